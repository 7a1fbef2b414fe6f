//! Data types shared by the evaluator, compiler, harness and recorder.

mod action_script;
mod block_kind;
mod block_node;
mod code_structure;
mod direction;
#[cfg(test)]
mod direction_test;
mod editor_event;
mod exercise;
mod grid_state;
mod interaction;
mod operation;
#[cfg(test)]
mod operation_test;
mod position;
mod session_record;
mod tile;
mod verdict;

pub use action_script::{ActionScript, Instruction, Opcode};
pub use block_kind::{BlockKind, REPEAT_TIMES_FIELD};
pub use block_node::{BlockNode, Slot};
pub use code_structure::{CodeChild, CodeFingerprint, CodeSnapshot, CodeStructure, ProgramStructure};
pub use direction::{Direction, Turn};
pub use editor_event::{BlockSpec, ChildSpec, EditorEvent, EventSource, SurfacePoint, TimedEvent};
pub use exercise::Exercise;
pub use grid_state::{CollectLedger, CollectProgress, CollectTotals, GridState, Robot};
pub use interaction::{DragOutcome, DragRecord, InteractionAction, PendingDrag};
pub use operation::{MoveAction, Operation, OperationAction};
pub use position::Position;
pub use session_record::SessionRecord;
pub use tile::{MAX_TILE_COUNT, Tile};
pub use verdict::Verdict;
