//! Crate-wide constants and default values
//!
//! Centralized location for the names and markers shared between modules

/// Member names with a fixed meaning
pub mod member {
    /// The member every Variable node carries
    pub const VARIABLE_VALUE: &str = "value";
}

/// Component names the presentation layer looks up
pub mod component {
    /// Presentation adapter attached to nodes and wires
    pub const VIEW: &str = "view";
}

/// Display formatting
pub mod display {
    /// Label of a Variable that has not been named yet
    pub const UNNAMED_VARIABLE: &str = "<unnamed>";

    /// Text shown for a value that was never assigned
    pub const UNSET_VALUE: &str = "<unset>";

    /// Prefix used when a node reference is rendered as text
    pub const REFERENCE_PREFIX: &str = "node#";

    /// Separator between a Variable's name and its value in the label
    pub const LABEL_SEPARATOR: &str = " = ";

    /// Type name reported for an untyped value
    pub const UNKNOWN_TYPE: &str = "Unknown";
}

/// Node system constants
pub mod node {
    /// Title given to Variable nodes before they are named
    pub const VARIABLE_TITLE: &str = "Variable";
}
