//! Typed option groups for wkhtmltopdf.
//!
//! Each group holds a set of named settings and knows how to project itself into the
//! ordered argument fragment the tool expects. Every group starts out empty: options left
//! at their default are never emitted, booleans emit their bare flag when set, valued
//! options emit the flag followed by the value and repeatable options emit one flag per
//! entry in the order they were added.

mod global;
pub use global::*;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

mod header_footer;
pub use header_footer::*;

mod toc;
pub use toc::*;

/// Anything that renders into a fragment of the wkhtmltopdf command line
pub trait ToArgs {
    fn args(&self) -> Vec<String>;
}

/// Values that can follow a flag on the command line
pub(crate) trait ArgValue {
    fn to_arg(&self) -> Option<String>;
}

impl ArgValue for String {
    fn to_arg(&self) -> Option<String> {
        // an empty string is an unset string
        if self.is_empty() {
            None
        } else {
            Some(self.clone())
        }
    }
}

impl ArgValue for u32 {
    fn to_arg(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ArgValue for f64 {
    fn to_arg(&self) -> Option<String> {
        Some(format!("{self:.3}"))
    }
}

/// Accumulates an argument fragment in emission order.
#[derive(Debug, Default)]
pub(crate) struct ArgList(Vec<String>);

impl ArgList {
    pub fn new() -> ArgList {
        ArgList::default()
    }

    pub fn flag(&mut self, name: &str, set: bool) -> &mut Self {
        if set {
            self.0.push(name.to_string());
        }
        self
    }

    pub fn value<T: ArgValue>(&mut self, name: &str, value: &Option<T>) -> &mut Self {
        if let Some(value) = value.as_ref().and_then(ArgValue::to_arg) {
            self.0.push(name.to_string());
            self.0.push(value);
        }
        self
    }

    pub fn each(&mut self, name: &str, values: &[String]) -> &mut Self {
        for value in values {
            self.0.push(name.to_string());
            self.0.push(value.clone());
        }
        self
    }

    pub fn pairs(&mut self, name: &str, pairs: &[(String, String)]) -> &mut Self {
        for (key, value) in pairs {
            self.0.push(name.to_string());
            self.0.push(key.clone());
            self.0.push(value.clone());
        }
        self
    }

    pub fn extend<A: ToArgs + ?Sized>(&mut self, group: &A) -> &mut Self {
        self.0.extend(group.args());
        self
    }

    pub fn finish(&mut self) -> Vec<String> {
        std::mem::take(&mut self.0)
    }
}
