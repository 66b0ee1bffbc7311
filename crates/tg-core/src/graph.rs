//! Path-graph selector shared by the planner and the motion controller.

/// Which navigation graph a path request should be solved on.
///
/// The controller picks `Orthogonal` when the goal sits next to a hard
/// obstacle, so the final approach never slides diagonally along a wall.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphSelector {
    /// 8-connected graph; diagonal steps allowed.
    #[default]
    Diagonal,
    /// 4-connected graph; axis-aligned steps only.
    Orthogonal,
}

impl GraphSelector {
    /// `true` if diagonal steps are legal on this graph.
    #[inline]
    pub fn allows_diagonal(self) -> bool {
        matches!(self, GraphSelector::Diagonal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphSelector::Diagonal   => "diagonal",
            GraphSelector::Orthogonal => "orthogonal",
        }
    }
}

impl std::fmt::Display for GraphSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
