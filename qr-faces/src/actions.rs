use serde::{Deserialize, Serialize};

// Everything a player can do, as one serializable message. A UI or a scripted session sends
// these to `FaceCollector::apply` and gets a snapshot back.

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum UserAction {
    Scan { payload: String },
    ClearFound,
    AddFound,
    Remove { index: usize },
    Reset,
    StartCapture,
    StopCapture,
    ToggleCapture,
}
