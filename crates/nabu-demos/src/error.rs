use std::fmt;

#[derive(Debug)]
pub enum DemoError {
    /// A demo is already running; go back to the menu first.
    NotAtMenu { current: String },
    UnknownDemo(String),
    Construction { name: String, source: anyhow::Error },
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::NotAtMenu { current } => {
                write!(f, "cannot switch demos while `{current}` is running")
            }
            DemoError::UnknownDemo(name) => write!(f, "no demo registered as `{name}`"),
            DemoError::Construction { name, source } => {
                write!(f, "failed to start demo `{name}`: {source:#}")
            }
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Construction { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
