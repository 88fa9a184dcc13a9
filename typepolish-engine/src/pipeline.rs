//! Rewrite orchestration
//!
//! One pipeline serves every route. Which collaborators it talks to is
//! decided by the handles it is built with, so the offline, grammar-only and
//! remote variants differ in configuration only.

use std::sync::Arc;

use typepolish_core::{
    build_prompt, capitalize_and_punctuate, normalize, segment, CorrectionMode, PhraseRewriter,
    RuleSet, Sentence, Style, Tone, ToneStyleApplier,
};

use crate::collaborator::{
    ClientHandle, Generator, GrammarChecker, InferenceGenerator, LanguageToolChecker,
};
use crate::config::{EngineConfig, FallbackText, GenerationMode, PipelineConfig};
use crate::error::{Result, ServiceError};
use crate::summary::{self, PolishSource, GENERATION_SERVICE, GRAMMAR_SERVICE, NO_TEXT};

/// Result of one pipeline operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Best-effort corrected or rewritten text
    pub text: String,
    /// Human-readable description of what was done
    pub summary: String,
    /// Whether any collaborator failed during this request
    pub degraded: bool,
    /// Tone applied, when the operation takes one
    pub applied_tone: Option<Tone>,
    /// Style applied, when the operation takes one
    pub applied_style: Option<Style>,
}

impl Report {
    /// Report for empty or whitespace-only input
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            summary: NO_TEXT.to_string(),
            degraded: false,
            applied_tone: None,
            applied_style: None,
        }
    }
}

/// Orchestrates normalization, grammar correction, phrase rewriting,
/// tone/style application and generation.
pub struct RewritePipeline {
    rules: Arc<RuleSet>,
    rewriter: PhraseRewriter,
    applier: ToneStyleApplier,
    grammar: ClientHandle<dyn GrammarChecker>,
    generator: ClientHandle<dyn Generator>,
    settings: PipelineConfig,
}

impl std::fmt::Debug for RewritePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewritePipeline")
            .field("rules", &self.rules.code())
            .field("grammar", &self.grammar)
            .field("generator", &self.generator)
            .field("settings", &self.settings)
            .finish()
    }
}

impl RewritePipeline {
    /// Create a builder
    pub fn builder() -> RewritePipelineBuilder {
        RewritePipelineBuilder::default()
    }

    /// Build a pipeline whose HTTP collaborators are created lazily from
    /// `config` on first use.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let rules = config.load_rules()?;

        let grammar_config = config.grammar.clone();
        let grammar = ClientHandle::lazy(GRAMMAR_SERVICE, move || {
            LanguageToolChecker::new(&grammar_config)
                .map(|checker| Arc::new(checker) as Arc<dyn GrammarChecker>)
        });

        let generation_config = config.generation.clone();
        let generator = ClientHandle::lazy(GENERATION_SERVICE, move || {
            InferenceGenerator::from_env(&generation_config)
                .map(|generator| Arc::new(generator) as Arc<dyn Generator>)
        });

        Ok(Self::builder()
            .rules(rules)
            .grammar_handle(grammar)
            .generator_handle(generator)
            .settings(config.pipeline)
            .build())
    }

    /// Pipeline with built-in rules and no external collaborators
    pub fn offline() -> Self {
        Self::builder()
            .settings(PipelineConfig {
                generation: GenerationMode::Local,
                ..PipelineConfig::default()
            })
            .build()
    }

    /// Rule set in use
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Pipeline settings
    pub fn settings(&self) -> PipelineConfig {
        self.settings
    }

    /// Segment text into sentences
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        segment(&normalize(text))
    }

    /// Deterministic phrase rewrite with adjacent-duplicate suppression
    pub fn rewrite_text(&self, text: &str) -> String {
        self.rewriter.rewrite_text(text)
    }

    /// Paraphrase prompt for `text` using the active rule set's instructions
    pub fn build_prompt(&self, text: &str, tone: Tone, style: Style) -> String {
        build_prompt(&self.rules, text, tone, style)
    }

    /// Grammar-correct `text`. On any failure the input comes back unchanged
    /// with `false`.
    pub fn external_correct(&self, text: &str) -> (String, bool) {
        self.grammar
            .call(|checker| checker.check_and_correct(text))
            .or_fallback(text)
    }

    /// Generate text for `prompt`. On any failure the text is empty and the
    /// flag is `false`; callers choose the fallback.
    pub fn external_generate(&self, prompt: &str) -> (String, bool) {
        self.generator
            .call(|generator| generator.generate(prompt))
            .or_fallback("")
    }

    /// Grammar correction followed by a correction-mode adjustment
    pub fn correct(&self, text: &str, mode: CorrectionMode) -> Report {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Report::empty();
        }

        let (checked, grammar_ok) = self.external_correct(&normalized);
        if !grammar_ok {
            tracing::info!(route = "correct", "grammar check failed, continuing with original text");
        }
        let adjusted = self.applier.apply_mode(&checked, mode);
        let text = capitalize_and_punctuate(&adjusted);
        tracing::debug!(route = "correct", %mode, output = %text, "correction complete");

        Report {
            text,
            summary: summary::correct(mode, grammar_ok),
            degraded: !grammar_ok,
            applied_tone: None,
            applied_style: None,
        }
    }

    /// Grammar pass, then generation with tone and style instructions
    pub fn polish(&self, text: &str, tone: Tone, style: Style) -> Report {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Report::empty();
        }

        let (checked, grammar_ok) = self.external_correct(&normalized);
        let corrected = capitalize_and_punctuate(&checked);

        let (text, source) = match self.settings.generation {
            GenerationMode::Local => (self.local_rewrite(&corrected, tone, style), PolishSource::Local),
            GenerationMode::Remote => {
                let prompt = self.build_prompt(&corrected, tone, style);
                tracing::trace!(%prompt, "generation prompt");
                match self.external_generate(&prompt) {
                    (generated, true) => (generated, PolishSource::Generated),
                    (_, false) => {
                        let fallback = self.settings.fallback;
                        tracing::info!(route = "polish-ai", ?fallback, "generation failed, using fallback text");
                        let text = match fallback {
                            FallbackText::Corrected => corrected,
                            FallbackText::Rewritten => self.local_rewrite(&corrected, tone, style),
                        };
                        (text, PolishSource::Fallback(fallback))
                    }
                }
            }
        };

        let degraded = !grammar_ok || matches!(source, PolishSource::Fallback(_));
        Report {
            text,
            summary: summary::polish(tone, style, source, grammar_ok),
            degraded,
            applied_tone: Some(tone),
            applied_style: Some(style),
        }
    }

    /// Grammar pass, phrase rewrite and tone adjustment, without generation
    pub fn rewrite_tone(&self, text: &str, tone: Tone) -> Report {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Report::empty();
        }

        let (checked, grammar_ok) = self.external_correct(&normalized);
        if !grammar_ok {
            tracing::info!(route = "rewrite-tone", "grammar check failed, continuing with original text");
        }
        let rewritten = self.rewriter.rewrite_text(&checked);
        let text = capitalize_and_punctuate(&self.applier.apply_tone(&rewritten, tone));

        Report {
            text,
            summary: summary::rewrite_tone(tone, grammar_ok),
            degraded: !grammar_ok,
            applied_tone: Some(tone),
            applied_style: None,
        }
    }

    fn local_rewrite(&self, text: &str, tone: Tone, style: Style) -> String {
        let rewritten = self.rewriter.rewrite_text(text);
        capitalize_and_punctuate(&self.applier.apply(&rewritten, tone, style))
    }
}

/// Builder for [`RewritePipeline`]
#[derive(Default)]
pub struct RewritePipelineBuilder {
    rules: Option<Arc<RuleSet>>,
    grammar: Option<ClientHandle<dyn GrammarChecker>>,
    generator: Option<ClientHandle<dyn Generator>>,
    settings: PipelineConfig,
}

impl RewritePipelineBuilder {
    /// Use a custom rule set instead of the built-in English rules
    pub fn rules(mut self, rules: Arc<RuleSet>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Use an already constructed grammar checker
    pub fn grammar_checker(self, checker: Arc<dyn GrammarChecker>) -> Self {
        self.grammar_handle(ClientHandle::ready(GRAMMAR_SERVICE, checker))
    }

    /// Use a grammar checker handle
    pub fn grammar_handle(mut self, handle: ClientHandle<dyn GrammarChecker>) -> Self {
        self.grammar = Some(handle);
        self
    }

    /// Use an already constructed generator
    pub fn generator(self, generator: Arc<dyn Generator>) -> Self {
        self.generator_handle(ClientHandle::ready(GENERATION_SERVICE, generator))
    }

    /// Use a generator handle
    pub fn generator_handle(mut self, handle: ClientHandle<dyn Generator>) -> Self {
        self.generator = Some(handle);
        self
    }

    /// Pipeline settings
    pub fn settings(mut self, settings: PipelineConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Build the pipeline. Missing collaborators are unavailable.
    pub fn build(self) -> RewritePipeline {
        let rules = self.rules.unwrap_or_else(typepolish_core::builtin_rules);
        let grammar = self.grammar.unwrap_or_else(|| {
            ClientHandle::unavailable(
                GRAMMAR_SERVICE,
                ServiceError::NotConfigured("no grammar checker".to_string()),
            )
        });
        let generator = self.generator.unwrap_or_else(|| {
            ClientHandle::unavailable(
                GENERATION_SERVICE,
                ServiceError::NotConfigured("no generator".to_string()),
            )
        });

        RewritePipeline {
            rewriter: PhraseRewriter::new(Arc::clone(&rules)),
            applier: ToneStyleApplier::new(Arc::clone(&rules)),
            rules,
            grammar,
            generator,
            settings: self.settings,
        }
    }
}
