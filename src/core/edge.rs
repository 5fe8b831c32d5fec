/// An edge as given to graph construction.
///
/// The weight is carried along for consumers that want it (see
/// [`WeightedValuedGraphWrapper::from_edges`](crate::adapt::WeightedValuedGraphWrapper::from_edges)),
/// storages themselves only keep the topology.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<N> {
    pub source: N,
    pub sink: N,
    pub weight: Option<i64>,
}

impl<N> Edge<N> {
    pub fn new(source: N, sink: N) -> Self {
        Self {
            source,
            sink,
            weight: None,
        }
    }

    pub fn weighted(source: N, sink: N, weight: i64) -> Self {
        Self {
            source,
            sink,
            weight: Some(weight),
        }
    }
}

impl<N> From<(N, N)> for Edge<N> {
    fn from((source, sink): (N, N)) -> Self {
        Self::new(source, sink)
    }
}

impl<N> From<(N, N, i64)> for Edge<N> {
    fn from((source, sink, weight): (N, N, i64)) -> Self {
        Self::weighted(source, sink, weight)
    }
}

impl<N: Clone> From<&(N, N)> for Edge<N> {
    fn from((source, sink): &(N, N)) -> Self {
        Self::new(source.clone(), sink.clone())
    }
}

impl<N: Clone> From<&Edge<N>> for Edge<N> {
    fn from(edge: &Edge<N>) -> Self {
        edge.clone()
    }
}
