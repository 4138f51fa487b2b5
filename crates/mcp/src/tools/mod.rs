pub mod interop;
mod registry;

pub use interop::{register_interop_tools, Operation, PharoTool};
pub use registry::{
    json_schema_boolean, json_schema_object, json_schema_string, Tool, ToolRegistry,
};
