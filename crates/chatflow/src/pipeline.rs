//! The static description of the illustrated chatbot pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`StepSpec`]s, each with the labels of
//! the ML techniques annotating it. [`Pipeline::chatbot`] returns the built-in
//! seven-stage pipeline; [`Pipeline::new`] accepts any other list as long as
//! it satisfies the layout invariants.

use thiserror::Error;

const TITLE: &str = "AI and Machine Learning in Chatbot Functionality";

const FEEDBACK_CAPTION: &str = "Continuous\nImprovement\nFeedback\nLoop";

const CHATBOT_STEPS: &[(&str, &[&str])] = &[
    ("User Input Processing", &["Text cleaning", "Normalization"]),
    (
        "Tokenization & NLP Analysis",
        &["Tokenization", "POS tagging", "Semantic analysis"],
    ),
    (
        "Intent Classification",
        &["ML classifiers", "Intent categorization"],
    ),
    ("Entity Recognition", &["NER models", "Entity extraction"]),
    (
        "Knowledge Base Retrieval",
        &["Vector embeddings", "RAG", "Semantic search"],
    ),
    ("Response Generation", &["LLMs", "NLG", "Personalization"]),
    (
        "Learning & Improvement",
        &["Feedback loop", "Model retraining"],
    ),
];

/// Invariant violations detected by [`Pipeline::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("pipeline has no steps")]
    Empty,

    #[error("step `{step}` has no components")]
    NoComponents { step: String },
}

/// One stage of the pipeline and the labels of its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    label: String,
    components: Vec<String>,
}

impl StepSpec {
    /// Creates a step with the given label and component labels.
    pub fn new<I, S>(label: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the step label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the component labels in display order.
    pub fn components(&self) -> &[String] {
        &self.components
    }
}

/// An ordered, validated list of pipeline steps plus the diagram captions.
///
/// # Examples
///
/// ```
/// use chatflow::pipeline::{Pipeline, StepSpec};
///
/// let pipeline = Pipeline::new(
///     "Two stages",
///     "Loop",
///     vec![
///         StepSpec::new("Parse", ["Lexer"]),
///         StepSpec::new("Answer", ["LLMs", "NLG"]),
///     ],
/// )
/// .unwrap();
/// assert_eq!(pipeline.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    title: String,
    feedback_caption: String,
    steps: Vec<StepSpec>,
}

impl Pipeline {
    /// Creates a pipeline, checking that it has at least one step and that
    /// every step has at least one component.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Empty`] for an empty step list and
    /// [`PipelineError::NoComponents`] naming the first step without components.
    pub fn new(
        title: impl Into<String>,
        feedback_caption: impl Into<String>,
        steps: Vec<StepSpec>,
    ) -> Result<Self, PipelineError> {
        if steps.is_empty() {
            return Err(PipelineError::Empty);
        }

        if let Some(step) = steps.iter().find(|s| s.components.is_empty()) {
            return Err(PipelineError::NoComponents {
                step: step.label.clone(),
            });
        }

        Ok(Self {
            title: title.into(),
            feedback_caption: feedback_caption.into(),
            steps,
        })
    }

    /// Returns the built-in seven-stage chatbot NLP pipeline.
    pub fn chatbot() -> Self {
        let steps = CHATBOT_STEPS
            .iter()
            .map(|(label, components)| StepSpec::new(*label, components.iter().copied()))
            .collect();

        Self::new(TITLE, FEEDBACK_CAPTION, steps).expect("built-in pipeline is valid")
    }

    /// Returns the diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the caption drawn beside the feedback loop.
    pub fn feedback_caption(&self) -> &str {
        &self.feedback_caption
    }

    /// Returns the steps in top-to-bottom order.
    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::chatbot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chatbot_pipeline_shape() {
        let pipeline = Pipeline::chatbot();

        assert_eq!(pipeline.len(), 7);
        assert!(!pipeline.is_empty());
        assert_eq!(pipeline.steps()[0].label(), "User Input Processing");
        assert_eq!(pipeline.steps()[6].label(), "Learning & Improvement");
        assert_eq!(
            pipeline.title(),
            "AI and Machine Learning in Chatbot Functionality"
        );
        assert_eq!(pipeline.feedback_caption().lines().count(), 4);
    }

    #[test]
    fn test_chatbot_pipeline_component_counts() {
        let counts: Vec<usize> = Pipeline::chatbot()
            .steps()
            .iter()
            .map(|s| s.components().len())
            .collect();
        assert_eq!(counts, vec![2, 3, 2, 2, 3, 3, 2]);
    }

    #[test]
    fn test_knowledge_base_retrieval_components() {
        let pipeline = Pipeline::chatbot();
        let step = pipeline
            .steps()
            .iter()
            .find(|s| s.label() == "Knowledge Base Retrieval")
            .expect("step exists");
        assert_eq!(
            step.components(),
            ["Vector embeddings", "RAG", "Semantic search"]
        );
    }

    #[test]
    fn test_new_rejects_empty_pipeline() {
        let result = Pipeline::new("t", "c", Vec::new());
        assert_eq!(result, Err(PipelineError::Empty));
    }

    #[test]
    fn test_new_rejects_step_without_components() {
        let steps = vec![
            StepSpec::new("Parse", ["Lexer"]),
            StepSpec::new("Answer", Vec::<String>::new()),
        ];
        let err = Pipeline::new("t", "c", steps).unwrap_err();
        assert_eq!(
            err,
            PipelineError::NoComponents {
                step: "Answer".to_string()
            }
        );
        assert_eq!(err.to_string(), "step `Answer` has no components");
    }
}
