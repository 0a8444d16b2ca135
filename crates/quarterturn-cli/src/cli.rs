//! Argument handling and the load, rotate, save sequence.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use quarterturn_core::{load_image, rotate, save_image};

const DEFAULT_PROGRAM: &str = "quarterturn";

/// Input and output paths of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Wrong argument count. Displays as the usage line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    program: String,
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Usage: {} <input_image_path> <output_image_path>",
            self.program
        )
    }
}

/// Parse the full argument list, program name included.
///
/// Exactly two arguments must follow the program name.
pub fn parse_args<I>(args: I) -> Result<Invocation, Usage>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let program = args
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    let rest: Vec<OsString> = args.collect();
    match <[OsString; 2]>::try_from(rest) {
        Ok([input, output]) => Ok(Invocation {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }),
        Err(_) => Err(Usage { program }),
    }
}

/// Load the input image, rotate it 90° clockwise, and save it to the output path.
pub fn run(invocation: &Invocation) -> anyhow::Result<()> {
    let Invocation { input, output } = invocation;

    let image = load_image(input)
        .with_context(|| format!("failed to load image {}", input.display()))?;

    let rotated = rotate(image).context("failed to rotate image")?;

    save_image(&rotated, output)
        .with_context(|| format!("failed to save image {}", output.display()))?;

    log::info!(
        "rotated {} -> {} ({}x{})",
        input.display(),
        output.display(),
        rotated.width,
        rotated.height
    );
    Ok(())
}
