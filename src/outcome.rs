#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOutcome<T, S> {
    pub resolved: T,
    pub source: S,
    pub degraded: bool,
}
