use std::fmt;

/// Steps of one page's check cycle, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetching,
    Extracting,
    StoringSnapshot,
    LocatingBaseline,
    Diffing,
    StoringDiff,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::StoringSnapshot => "storing snapshot",
            Stage::LocatingBaseline => "locating baseline",
            Stage::Diffing => "diffing",
            Stage::StoringDiff => "storing diff",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}
