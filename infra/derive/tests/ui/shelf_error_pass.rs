use shelf_derive::shelf_error;
use std::borrow::Cow;

#[shelf_error]
pub enum DemoError {
    #[error("Missing name{}", format_context(.context))]
    MissingName { context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },
}

fn open(path: &str) -> Result<Vec<u8>, DemoError> {
    let bytes = std::fs::read(path).context("Reading demo file")?;
    Ok(bytes)
}

fn main() {
    let err = open("/definitely/not/here").unwrap_err();
    assert!(err.to_string().contains("Reading demo file"));

    let missing: Result<(), DemoError> = Err(DemoError::MissingName { context: None });
    let err = missing.context("while validating").unwrap_err();
    assert_eq!(err.to_string(), "Missing name (while validating)");
}
