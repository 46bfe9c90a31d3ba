//! Image generation collaborator
//!
//! The session hands a prompt to a [`Generator`] and gets back one finished
//! image. The call blocks until the model is done; there are no partial
//! results, no timeout, and no cancellation.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::history::Artifact;

/// Maximum stderr bytes kept in an error for a failed generator run
const STDERR_EXCERPT_LIMIT: usize = 512;

/// Errors that can occur while generating an image
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The generator program could not be started
    #[error("failed to start generator {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The generator exited unsuccessfully
    #[error("generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    /// The generator produced no output
    #[error("generator produced no image data")]
    EmptyOutput,
    /// The generator output is not a decodable image
    #[error("generator output is not an image: {0}")]
    Decode(#[from] image::ImageError),
    /// No generator has been configured
    #[error("no generator configured")]
    NotConfigured,
}

/// Produces one image per prompt
pub trait Generator {
    /// Generate an image for `prompt`, blocking until it is ready
    fn generate(&mut self, prompt: &str) -> Result<Artifact, GenerateError>;
}

impl<F> Generator for F
where
    F: FnMut(&str) -> Result<Artifact, GenerateError>,
{
    fn generate(&mut self, prompt: &str) -> Result<Artifact, GenerateError> {
        self(prompt)
    }
}

/// Runs an external program per prompt
///
/// The program is invoked as `program [args...] <prompt>` and must write an
/// encoded image (PNG, JPEG, ...) to stdout and exit with status 0.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Create a generator for `program` with leading `args`
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Program path or name
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl Generator for CommandGenerator {
    fn generate(&mut self, prompt: &str) -> Result<Artifact, GenerateError> {
        let program = self.program.display().to_string();
        tracing::debug!(%program, prompt_chars = prompt.chars().count(), "running generator");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .output()
            .map_err(|source| GenerateError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = truncate_chars(stderr.trim(), STDERR_EXCERPT_LIMIT);
            tracing::warn!(%program, status = %output.status, %stderr, "generator failed");
            return Err(GenerateError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        if output.stdout.is_empty() {
            return Err(GenerateError::EmptyOutput);
        }

        let image = image::load_from_memory(&output.stdout)?;
        tracing::debug!(
            %program,
            width = image.width(),
            height = image.height(),
            "generator finished"
        );
        Ok(Artifact::new(image))
    }
}

/// Stand-in used when no generator program is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

impl Generator for UnconfiguredGenerator {
    fn generate(&mut self, _prompt: &str) -> Result<Artifact, GenerateError> {
        Err(GenerateError::NotConfigured)
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_generator() {
        let mut calls = Vec::new();
        let mut generator = |prompt: &str| {
            calls.push(prompt.to_string());
            Ok::<_, GenerateError>(Artifact::new(image::DynamicImage::new_rgb8(1, 1)))
        };

        let artifact = generator.generate("a lighthouse").unwrap();

        assert_eq!(artifact.width(), 1);
        assert_eq!(calls, vec!["a lighthouse"]);
    }

    #[test]
    fn test_unconfigured_generator() {
        assert!(matches!(
            UnconfiguredGenerator.generate("anything"),
            Err(GenerateError::NotConfigured)
        ));
    }

    #[test]
    fn test_missing_program() {
        let mut generator = CommandGenerator::new("/nonexistent/easel-generator", Vec::new());
        assert!(matches!(
            generator.generate("a cat"),
            Err(GenerateError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program() {
        let mut generator = CommandGenerator::new(
            "sh",
            vec!["-c".to_string(), "echo model exploded >&2; exit 3".to_string()],
        );

        match generator.generate("a cat") {
            Err(GenerateError::Failed { stderr, .. }) => assert_eq!(stderr, "model exploded"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output() {
        let mut generator = CommandGenerator::new("true", Vec::new());
        assert!(matches!(
            generator.generate("a cat"),
            Err(GenerateError::EmptyOutput)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_image_output() {
        let mut generator = CommandGenerator::new("echo", Vec::new());
        assert!(matches!(
            generator.generate("a cat"),
            Err(GenerateError::Decode(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_output_is_decoded() {
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let png_path = dir.path().join("out.png");
        let artifact = Artifact::new(image::DynamicImage::new_rgba8(3, 2));
        fs::write(&png_path, crate::history::encode_png(&artifact).unwrap()).unwrap();

        // `sh -c 'cat "$0"' <png> <prompt>`: the prompt becomes $1 and is ignored
        let mut generator = CommandGenerator::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat \"$0\"".to_string(),
                png_path.display().to_string(),
            ],
        );

        let generated = generator.generate("a tiny canvas").unwrap();
        assert_eq!((generated.width(), generated.height()), (3, 2));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("密码密码", 2), "密码...");
    }
}
