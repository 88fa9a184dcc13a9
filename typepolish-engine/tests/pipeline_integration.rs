//! Pipeline behaviour with stub collaborators

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use typepolish_engine::summary::{is_degraded, NO_TEXT};
use typepolish_engine::{
    ClientHandle, CorrectionMode, EngineConfig, FallbackText, Generator, GrammarChecker,
    PipelineConfig, RewritePipeline, ServiceError, Style, Tone,
};

/// Grammar checker that fixes one known typo and counts calls
#[derive(Default)]
struct TypoFixer {
    calls: AtomicUsize,
}

impl GrammarChecker for TypoFixer {
    fn check_and_correct(&self, text: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(text.replace("recieve", "receive"))
    }
}

/// Generator that always fails with the given error
struct BrokenGenerator(ServiceError);

impl Generator for BrokenGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
        Err(self.0.clone())
    }
}

/// Generator that echoes the text portion of the prompt in upper case
struct UpperGenerator;

impl Generator for UpperGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let text = prompt.rsplit("Text: ").next().unwrap_or_default();
        Ok(text.to_uppercase())
    }
}

#[test]
fn test_every_generation_failure_degrades() {
    let failures = [
        ServiceError::RateLimited,
        ServiceError::Timeout,
        ServiceError::Unavailable("loading".into()),
        ServiceError::Network("connection reset".into()),
        ServiceError::MalformedResponse("not json".into()),
        ServiceError::Http {
            status: 500,
            body: "boom".into(),
        },
    ];

    for failure in failures {
        let pipeline = RewritePipeline::builder()
            .grammar_checker(Arc::new(TypoFixer::default()))
            .generator(Arc::new(BrokenGenerator(failure.clone())))
            .build();
        let report = pipeline.polish("I will recieve it", Tone::Friendly, Style::Neutral);
        assert!(report.degraded, "{failure}");
        assert!(is_degraded(&report.summary), "{failure}");
        assert_eq!(report.text, "I will receive it. Have a great day!");
    }
}

#[test]
fn test_generated_text_used() {
    let pipeline = RewritePipeline::builder()
        .grammar_checker(Arc::new(TypoFixer::default()))
        .generator(Arc::new(UpperGenerator))
        .build();
    let report = pipeline.polish("we recieve mail", Tone::Professional, Style::Corporate);
    assert_eq!(report.text, "WE RECEIVE MAIL.");
    assert_eq!(
        report.summary,
        "Expression adjusted using Smart Rewrite v3 with 'Professional' tone and 'Corporate' writing style."
    );
}

#[test]
fn test_grammar_checker_not_called_for_empty_input() {
    let checker = Arc::new(TypoFixer::default());
    let pipeline = RewritePipeline::builder()
        .grammar_checker(Arc::clone(&checker) as Arc<dyn GrammarChecker>)
        .build();

    for text in ["", "    "] {
        let report = pipeline.correct(text, CorrectionMode::Grammar);
        assert_eq!(report.text, "");
        assert_eq!(report.summary, NO_TEXT);
        let report = pipeline.rewrite_tone(text, Tone::Caring);
        assert_eq!(report.summary, NO_TEXT);
    }
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_correct_grammar_failure_returns_normalized_original() {
    let pipeline = RewritePipeline::builder()
        .grammar_handle(ClientHandle::lazy("LanguageTool", || {
            Err(ServiceError::NotConfigured("no endpoint".into()))
        }))
        .build();
    let report = pipeline.correct("  i will   recieve it ", CorrectionMode::Grammar);
    assert_eq!(report.text, "I will recieve it.");
    assert!(report.summary.starts_with("Degraded mode:"));
}

#[test]
fn test_casual_mode_substring_collision() {
    let pipeline = RewritePipeline::builder()
        .grammar_checker(Arc::new(TypoFixer::default()))
        .build();
    let report = pipeline.correct("I desire tea, sir", CorrectionMode::Casual);
    assert_eq!(report.text, "I debroe tea, bro.");
}

#[test]
fn test_corrected_fallback_skips_rewrite() {
    let pipeline = RewritePipeline::builder()
        .grammar_checker(Arc::new(TypoFixer::default()))
        .generator(Arc::new(BrokenGenerator(ServiceError::Timeout)))
        .settings(PipelineConfig {
            fallback: FallbackText::Corrected,
            ..PipelineConfig::default()
        })
        .build();
    let report = pipeline.polish("I think that we recieve it", Tone::Calm, Style::Neutral);
    assert_eq!(report.text, "I think that we receive it.");
}

#[test]
fn test_segment_normalizes_first() {
    let pipeline = RewritePipeline::offline();
    let sentences = pipeline.segment("  we   left.\n\nDid you?  maybe ");
    let texts: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();
    assert_eq!(texts, ["we left.", "Did you?", "maybe"]);
    assert_eq!(sentences[1].offset(), 9);
    assert!(pipeline.segment(" \t ").is_empty());
}

#[test]
fn test_concurrent_requests_share_pipeline() {
    let checker = Arc::new(TypoFixer::default());
    let pipeline = Arc::new(
        RewritePipeline::builder()
            .grammar_checker(Arc::clone(&checker) as Arc<dyn GrammarChecker>)
            .build(),
    );

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                let text = format!("request {i} will recieve a reply");
                pipeline.correct(&text, CorrectionMode::Grammar).text
            })
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        assert_eq!(
            worker.join().unwrap(),
            format!("Request {i} will receive a reply.")
        );
    }
    assert_eq!(checker.calls.load(Ordering::SeqCst), 8);
}

#[test]
fn test_offline_config_pipeline() {
    let config = EngineConfig::default().offline();
    let pipeline = RewritePipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.settings(), config.pipeline);

    let report = pipeline.polish("so we left. so we left.", Tone::Neutral, Style::Neutral);
    assert_eq!(report.text, "As a result, we left.");
    // Grammar check is disabled, so the request is degraded
    assert!(report.degraded);

    let report = pipeline.correct("fine", CorrectionMode::Grammar);
    assert_eq!(report.text, "Fine.");
    assert!(report.degraded);
}

#[test]
fn test_custom_rules_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rules.toml"),
        r#"
[metadata]
code = "terse"
name = "Terse"

[[phrasing]]
pattern = "please kindly"
replacement = "please"
"#,
    )
    .unwrap();
    let config_path = dir.path().join("typepolish.toml");
    std::fs::write(&config_path, "rules = \"rules.toml\"\n").unwrap();

    let config = EngineConfig::from_file(&config_path).unwrap().offline();
    let pipeline = RewritePipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.rules().code(), "terse");
    assert_eq!(
        pipeline.rewrite_text("please kindly reply. but not now."),
        "please reply. but not now."
    );
}
