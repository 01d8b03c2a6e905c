//! The segmentation command: silences in, segments out.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use sgen_core::{SilenceSegmentator, TracingObserver};

use crate::config::Settings;
use crate::input::read_silences;
use crate::output::Sink;

/// Reads silences from `source`, segments them, and writes the document to
/// `output` or to `writer` when no output file is given.
pub fn run<W: Write>(
    writer: &mut W,
    source: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let config = settings.segmentation()?;
    debug!(?config, "segmentation thresholds");

    let silences = read_silences(source)
        .with_context(|| format!("failed to load silences from {}", source.display()))?;

    let outcome =
        SilenceSegmentator::from_config(&config).segment_with(&silences, &TracingObserver);

    let sink = Sink::from_output(output);
    sink.emit(&outcome.segments, writer)?;
    info!(
        silences = silences.len(),
        chapters = outcome.chapters.number_of_chapters(),
        segments = outcome.segments.len(),
        ?sink,
        "segments written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    const SCENARIO_B: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<silences>
  <silence from="PT5S" until="PT5.1S"/>
  <silence from="PT10S" until="PT12.5S"/>
  <silence from="PT15S" until="PT15.6S"/>
  <silence from="PT20S" until="PT20.7S"/>
  <silence from="PT1M30S" until="PT1M33S"/>
</silences>
"#;

    fn source_file(dir: &Path, xml: &str) -> std::path::PathBuf {
        let path = dir.join("silences.xml");
        std::fs::write(&path, xml).unwrap();
        path
    }

    fn settings(
        transition: Option<i64>,
        min_silence: Option<i64>,
        max_segment: Option<i64>,
    ) -> Settings {
        Settings {
            transition,
            min_silence,
            max_segment,
            debug: false,
        }
    }

    #[test]
    fn segments_long_chapter_to_writer() {
        let temp = tempfile::tempdir().unwrap();
        let source = source_file(temp.path(), SCENARIO_B);

        let mut output = Vec::new();
        run(
            &mut output,
            &source,
            None,
            &settings(Some(2_000), Some(500), Some(60_000)),
        )
        .unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r#"
        {
          "segments": [
            {
              "offset": "PT0S",
              "title": "Chapter 1"
            },
            {
              "offset": "PT12.5S",
              "title": "Chapter 2, part 1"
            },
            {
              "offset": "PT20.7S",
              "title": "Chapter 2, part 2"
            },
            {
              "offset": "PT1M33S",
              "title": "Chapter 3"
            }
          ]
        }
        "#);
    }

    #[test]
    fn writes_output_file_when_given() {
        let temp = tempfile::tempdir().unwrap();
        let source = source_file(temp.path(), SCENARIO_B);
        let target = temp.path().join("segments.json");

        let mut output = Vec::new();
        run(
            &mut output,
            &source,
            Some(&target),
            &settings(Some(2_000), None, None),
        )
        .unwrap();

        assert!(output.is_empty());
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
        let offsets: Vec<_> = written["segments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["offset"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(offsets, vec!["PT0S", "PT12.5S", "PT1M33S"]);
    }

    #[test]
    fn missing_transition_fails_before_reading() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing.xml");

        let err = run(&mut Vec::new(), &missing, None, &settings(None, None, None)).unwrap_err();
        assert!(err.to_string().contains("transition wasn't given"));
    }

    #[test]
    fn invalid_source_is_reported_with_path() {
        let temp = tempfile::tempdir().unwrap();
        let source = source_file(
            temp.path(),
            r#"<silences><silence from="PT1X" until="PT2S"/></silences>"#,
        );

        let err = run(&mut Vec::new(), &source, None, &settings(Some(2_000), None, None))
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to load silences from"));
        assert!(format!("{err:#}").contains("silence #1 has an invalid `from` value"));
    }
}
