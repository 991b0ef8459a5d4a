//! Command implementations

pub mod apply;
pub mod info;
pub mod list;

use rockext_extensions::Extension;

/// Supported bases of `extension` that only allow it as experimental
pub(crate) fn experimental_bases(extension: &dyn Extension) -> Vec<String> {
    extension
        .supported_bases()
        .iter()
        .copied()
        .filter(|base| extension.is_experimental(Some(*base)))
        .map(String::from)
        .collect()
}
