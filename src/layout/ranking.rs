use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use log::debug;

/// A hierarchy node in the layering arena; its slot is its input position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LayerNode<'a> {
    pub id: &'a str,
    pub rank: usize,
    pub order: usize,
}

/// Working graph for one layout call. Edges are arena indices, parent first.
#[derive(Debug)]
pub(super) struct LayerGraph<'a> {
    pub nodes: Vec<LayerNode<'a>>,
    pub edges: Vec<(usize, usize)>,
}

impl<'a> LayerGraph<'a> {
    pub fn new(node_ids: &[&'a str], edges: &[(&'a str, &'a str)]) -> Self {
        let nodes: Vec<LayerNode<'a>> = node_ids
            .iter()
            .map(|&id| LayerNode {
                id,
                rank: 0,
                order: 0,
            })
            .collect();
        let index: HashMap<&'a str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, idx))
            .collect();
        let edges = edges
            .iter()
            .filter_map(|(from, to)| Some((*index.get(from)?, *index.get(to)?)))
            .filter(|(from, to)| from != to)
            .collect();
        Self { nodes, edges }
    }

    fn outgoing(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for &(from, to) in &self.edges {
            adj[from].push(to);
        }
        adj
    }

    fn incoming(&self) -> Vec<Vec<usize>> {
        let mut rev = vec![Vec::new(); self.nodes.len()];
        for &(from, to) in &self.edges {
            rev[to].push(from);
        }
        rev
    }

    /// Reverses every DFS back edge so the edge set becomes acyclic.
    /// Returns how many edges were flipped.
    pub fn remove_cycles(&mut self) -> usize {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let count = self.nodes.len();
        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); count];
        for (edge_idx, &(from, _)) in self.edges.iter().enumerate() {
            out_edges[from].push(edge_idx);
        }

        let mut marks = vec![Mark::Unvisited; count];
        let mut back_edges: Vec<usize> = Vec::new();
        for root in 0..count {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // Explicit stack of (node, next outgoing edge) keeps deep trees off the call stack.
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            marks[root] = Mark::OnStack;
            while let Some(frame) = stack.last_mut() {
                let (node, cursor) = *frame;
                let Some(&edge_idx) = out_edges[node].get(cursor) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;
                let next = self.edges[edge_idx].1;
                match marks[next] {
                    Mark::OnStack => back_edges.push(edge_idx),
                    Mark::Unvisited => {
                        marks[next] = Mark::OnStack;
                        stack.push((next, 0));
                    }
                    Mark::Done => {}
                }
            }
        }

        for &edge_idx in &back_edges {
            let (from, to) = self.edges[edge_idx];
            self.edges[edge_idx] = (to, from);
        }
        if !back_edges.is_empty() {
            debug!("reversed {} back edge(s) for ranking", back_edges.len());
        }
        back_edges.len()
    }

    /// Longest path from any source. Assumes `remove_cycles` ran first; nodes
    /// a leftover cycle keeps out of the topological order stay at rank 0.
    pub fn assign_ranks(&mut self) {
        let adj = self.outgoing();
        let mut indeg = vec![0usize; self.nodes.len()];
        for &(_, to) in &self.edges {
            indeg[to] += 1;
        }

        let mut ready: BinaryHeap<Reverse<usize>> = indeg
            .iter()
            .enumerate()
            .filter(|(_, deg)| **deg == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        for node in &mut self.nodes {
            node.rank = 0;
        }
        while let Some(Reverse(idx)) = ready.pop() {
            let rank = self.nodes[idx].rank;
            for &next in &adj[idx] {
                let entry = &mut self.nodes[next].rank;
                *entry = (*entry).max(rank + 1);
                indeg[next] = indeg[next].saturating_sub(1);
                if indeg[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }
    }

    /// Groups node indices by rank, each bucket in input order.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let max_rank = self.nodes.iter().map(|node| node.rank).max().unwrap_or(0);
        let mut rank_nodes: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
        for (idx, node) in self.nodes.iter().enumerate() {
            rank_nodes[node.rank].push(idx);
        }
        rank_nodes
    }

    /// Median crossing reduction over `passes` down/up sweeps; records the
    /// final order on each node.
    pub fn order_layers(&mut self, rank_nodes: &mut [Vec<usize>], passes: usize) {
        if rank_nodes.len() > 1 {
            let incoming = self.incoming();
            let outgoing = self.outgoing();
            let mut positions = vec![0usize; self.nodes.len()];
            update_positions(rank_nodes, &mut positions);

            for _ in 0..passes.max(1) {
                for rank in 1..rank_nodes.len() {
                    if rank_nodes[rank].len() <= 1 {
                        continue;
                    }
                    sort_bucket(&mut rank_nodes[rank], &incoming, &positions);
                    update_positions(rank_nodes, &mut positions);
                }
                for rank in (0..rank_nodes.len() - 1).rev() {
                    if rank_nodes[rank].len() <= 1 {
                        continue;
                    }
                    sort_bucket(&mut rank_nodes[rank], &outgoing, &positions);
                    update_positions(rank_nodes, &mut positions);
                }
            }
        }

        for bucket in rank_nodes.iter() {
            for (order, &idx) in bucket.iter().enumerate() {
                self.nodes[idx].order = order;
            }
        }
    }
}

fn update_positions(rank_nodes: &[Vec<usize>], positions: &mut [usize]) {
    for bucket in rank_nodes {
        for (pos, &idx) in bucket.iter().enumerate() {
            positions[idx] = pos;
        }
    }
}

fn sort_bucket(bucket: &mut [usize], neighbors: &[Vec<usize>], positions: &[usize]) {
    let scores: HashMap<usize, f32> = bucket
        .iter()
        .map(|&idx| (idx, median_position(idx, neighbors, positions)))
        .collect();
    bucket.sort_by(|a, b| {
        match scores[a].partial_cmp(&scores[b]) {
            Some(Ordering::Equal) | None => positions[*a]
                .cmp(&positions[*b])
                .then_with(|| a.cmp(b)),
            Some(ordering) => ordering,
        }
    });
}

/// Median slot of a node's neighbours; a node without neighbours keeps its own slot.
pub(super) fn median_position(idx: usize, neighbors: &[Vec<usize>], positions: &[usize]) -> f32 {
    let mut values: Vec<f32> = neighbors[idx]
        .iter()
        .map(|&neighbor| positions[neighbor] as f32)
        .collect();
    if values.is_empty() {
        return positions[idx] as f32;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    }
}
