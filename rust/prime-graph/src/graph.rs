//! Undirected simple graph stored as a lower-triangular adjacency arena.
//!
//! Vertices are addressed by stable `usize` handles in insertion order.
//! Row `i` holds the adjacency of vertex `i` to vertices `0..i`, so each
//! edge is stored exactly once.

/// Normalizes a pair of handles to `(smaller, larger)`.
fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<T> {
    vertices: Vec<T>,
    adjacency: Vec<Vec<bool>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Graph {
            vertices: Vec::new(),
            adjacency: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> Graph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph without edges on the distinct values of `vertices`.
    pub fn from_vertices(vertices: impl IntoIterator<Item = T>) -> Self {
        let mut graph = Graph::new();
        graph.add_vertices(vertices);
        graph
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex values in handle order.
    pub fn vertices(&self) -> &[T] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> &T {
        &self.vertices[index]
    }

    /// Replaces the value stored at `index`, keeping its edges.
    pub fn set_vertex(&mut self, index: usize, value: T) {
        self.vertices[index] = value;
    }

    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.vertices.iter().position(|v| v == value)
    }

    fn push_vertex(&mut self, value: T, row: Vec<bool>) -> usize {
        self.adjacency.push(row);
        self.vertices.push(value);
        self.vertices.len() - 1
    }

    /// Adds `value` if it is not present yet; returns its handle.
    pub fn add_vertex(&mut self, value: T) -> usize {
        match self.index_of(&value) {
            Some(index) => index,
            None => {
                let row = vec![false; self.len()];
                self.push_vertex(value, row)
            }
        }
    }

    pub fn add_vertices(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.add_vertex(value);
        }
    }

    /// Connects two values, adding missing vertices first.
    pub fn add_edge(&mut self, a: T, b: T) {
        let i = self.add_vertex(a);
        let j = self.add_vertex(b);
        self.connect(i, j);
    }

    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (T, T)>) {
        for (a, b) in edges {
            self.add_edge(a, b);
        }
    }

    /// Sets the edge between two handles. Loops are ignored.
    pub fn connect(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (low, high) = ordered_pair(i, j);
        self.adjacency[high][low] = true;
    }

    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        let (low, high) = ordered_pair(i, j);
        self.adjacency[high][low]
    }

    /// Handles of all vertices adjacent to `index`, ascending.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        (0..self.len())
            .filter(|&other| self.adjacent(index, other))
            .collect()
    }

    /// Adds `value` with the neighbourhood of `index` plus an edge to
    /// `index` itself, and returns its handle.
    ///
    /// If `value` is already a vertex, it is connected to `index` and to all
    /// neighbours of `index` instead.
    pub fn clone_vertex(&mut self, index: usize, value: T) -> usize {
        let row: Vec<bool> = (0..self.len())
            .map(|other| other == index || self.adjacent(index, other))
            .collect();
        match self.index_of(&value) {
            None => self.push_vertex(value, row),
            Some(existing) => {
                for (other, &linked) in row.iter().enumerate() {
                    if linked {
                        self.connect(existing, other);
                    }
                }
                existing
            }
        }
    }

    /// All cocliques (independent sets) of maximum size, as vertex values.
    ///
    /// Exponential in the worst case; meant for prime graphs with a few
    /// dozen vertices.
    pub fn max_cocliques(&self) -> Vec<Vec<T>> {
        let all: Vec<usize> = (0..self.len()).collect();
        self.max_cocliques_among(&all)
            .into_iter()
            .map(|coclique| coclique.into_iter().map(|i| self.vertices[i].clone()).collect())
            .collect()
    }

    fn max_cocliques_among(&self, candidates: &[usize]) -> Vec<Vec<usize>> {
        if candidates.is_empty() {
            return vec![Vec::new()];
        }
        let mut limit = 0;
        let mut best: Vec<Vec<usize>> = Vec::new();
        for (pos, &first) in candidates.iter().enumerate() {
            let rest: Vec<usize> = candidates[pos + 1..]
                .iter()
                .copied()
                .filter(|&other| !self.adjacent(first, other))
                .collect();
            if rest.len() + 1 < limit {
                continue;
            }
            for mut coclique in self.max_cocliques_among(&rest) {
                let size = coclique.len() + 1;
                if size < limit {
                    continue;
                }
                if size > limit {
                    best.clear();
                    limit = size;
                }
                coclique.insert(0, first);
                best.push(coclique);
            }
        }
        best
    }
}

impl<T: Clone + Ord> Graph<T> {
    /// Edges as value pairs `(smaller, larger)`, sorted.
    pub fn edges(&self) -> Vec<(T, T)> {
        let mut edges = Vec::new();
        for (high, row) in self.adjacency.iter().enumerate() {
            for (low, &linked) in row.iter().enumerate() {
                if linked {
                    let (a, b) = (&self.vertices[high], &self.vertices[low]);
                    if a < b {
                        edges.push((a.clone(), b.clone()));
                    } else {
                        edges.push((b.clone(), a.clone()));
                    }
                }
            }
        }
        edges.sort();
        edges.dedup();
        edges
    }

    /// Sorted vertex values together with [`Graph::edges`].
    pub fn as_sparse_graph(&self) -> (Vec<T>, Vec<(T, T)>) {
        let mut vertices = self.vertices.clone();
        vertices.sort();
        (vertices, self.edges())
    }
}

/// Complete graph on the vertices `0..n`.
pub fn full_graph(n: usize) -> Graph<usize> {
    Graph {
        vertices: (0..n).collect(),
        adjacency: (0..n).map(|i| vec![true; i]).collect(),
    }
}
