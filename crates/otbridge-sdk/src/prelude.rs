//! Prelude 模块
//!
//! ```rust
//! use otbridge_sdk::prelude::*;
//! ```

pub use crate::command::{Deck, DeckCommand};
pub use crate::error::SdkError;
pub use crate::helpers::{
    calibration_file_path, get_row, get_well, halt, halt_driver, run_group, run_in_background,
    run_method, update_multichannel_start_row, update_vector, xyz_to_vector,
};
pub use crate::version::{parsed_version, satisfies, sdk_version, version};
pub use otbridge_invoker::{
    GroupReport, InvokeError, Invoker, InvokerConfig, Shared, TaskHandle, TaskOutcome, WorkItem,
    shared,
};
pub use otbridge_labware::{
    Calibration, ControlLibrary, HardwareError, Labware, Pipette, Robot, RobotDriver, Row, Vector,
    VectorPatch, Well,
};
