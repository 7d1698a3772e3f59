pub mod descriptor;
pub mod directive;
pub mod error;
pub mod report;

pub use descriptor::{
    ClassDescriptor, DocstringSlot, FunctionDescriptor, ImportRef, ModuleDescriptor, Span,
    UnitKind, UnitRef,
};
pub use directive::Directive;
pub use error::{DocError, ErrorCategory, ErrorClassifier, LlmError, Result};
pub use report::{
    FileReport, FileStatus, ParseFailure, ProcessingReport, UnitOutcome, UnitStatus,
};
