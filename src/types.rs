/// Identifier for one audio file within a dataset (relative path under the root).
/// Example: `bhairavi/bhairavi_raga/morning_alap/clip_03.wav`
pub type FileId = String;
/// Top-level taxonomy label for a clip.
/// Examples: `bhairavi`, `kalyan`
pub type Category = String;
/// Second-level taxonomy label, the unit that receives a dense integer id.
/// Examples: `bhairavi_raga`, `yaman`
pub type SubCategory = String;
/// Terminal clip file name.
/// Example: `clip_03.wav`
pub type ClipName = String;
/// Numeric label vector attached to an example when labeling is enabled.
/// Example: `[441000, 52000, 262144, 7, -1, -1]`
pub type LabelVector = Vec<i64>;
/// Rank of a worker participating in parallel dataset construction.
/// Example: `3` (fourth worker of a pool)
pub type WorkerRank = u64;
