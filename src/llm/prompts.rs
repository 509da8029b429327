//! Prompt templates for narrative generation

use std::collections::HashMap;

/// Template for generating prompts
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template with variables
    #[must_use]
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        let mut result = self.template.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var) {
                result = result.replace(&format!("{{{{{var}}}}}"), value);
            }
        }
        result
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    chars.next();
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        break;
                    }
                } else {
                    var_name.push(ch);
                    chars.next();
                }
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

/// Prompt templates for the report assembler
pub struct ReportPrompts;

impl ReportPrompts {
    /// System prompt for the creator wellbeing report
    #[must_use]
    pub fn health_system() -> &'static str {
        r"You are an AI specialized in analyzing YouTube creator mental health and well-being.
Focus on:
1. Speech patterns and emotional indicators in transcripts
2. Signs of stress, burnout, or fatigue
3. Creator-audience relationship
4. Work-life balance indicators
5. Overall emotional state

Provide actionable insights and recommendations for maintaining good mental health.
If there are concerning patterns, suggest professional resources or coping strategies.
Be empathetic but professional in your analysis."
    }

    /// User prompt for the creator wellbeing report
    #[must_use]
    pub fn health_report() -> PromptTemplate {
        PromptTemplate::new(
            r"Analyze this creator's mental health based on their video transcript and audience comments:

CONTENT ANALYSIS:
- Overall Sentiment: {{transcript_sentiment}}
- Emotional State Score: {{emotional_state}}
- Burnout Risk Level: {{burnout_risk}}
- Work-Life Balance: {{work_life_balance}}

Positive Emotions: {{positive_emotions}}
Negative Emotions: {{negative_emotions}}

MENTAL HEALTH INDICATORS:
- Awareness Terms: {{awareness_terms}}
- Warning Signs: {{warning_terms}}
- Resilience Indicators: {{resilience_terms}}

AUDIENCE INTERACTION ({{comment_count}} comments):
- Community Support: {{community_support}}
- Audience Emotional State: {{audience_emotional_state}}
- Community Mental Health Awareness: {{audience_awareness}}

{{transcript_section}}

{{comments_section}}

Please provide:
1. A comprehensive analysis of the creator's mental well-being
2. Specific stress or burnout indicators identified
3. Work-life balance assessment
4. Community support evaluation
5. Actionable recommendations for:
   - Immediate stress relief
   - Long-term mental health maintenance
   - Work-life balance improvement
   - Community engagement
6. Professional support suggestions if needed

Note: {{transcript_note}}",
        )
    }

    /// System prompt for the video content analysis
    #[must_use]
    pub fn content_analysis_system() -> &'static str {
        "You are an expert video content analyzer specialized in detecting creator \
         mental health indicators, audience reception, and content quality. \
         Provide a comprehensive, detailed analysis."
    }

    /// User prompt for the video content analysis
    #[must_use]
    pub fn content_analysis() -> PromptTemplate {
        PromptTemplate::new(
            r"Analyze this YouTube video transcript and audience data, and provide detailed insights about:
1. Content summary
2. Creator's emotional state and potential mental health indicators
3. Key themes and talking points
4. Tone and sentiment analysis
5. Audience engagement potential

VIDEO DETAILS:
Title: {{title}}
Channel: {{channel}}
Views: {{views}}
Likes: {{likes}}
Subscribers: {{subscribers}}

SENTIMENT ANALYSIS ({{comment_count}} comments):
- Positive comments: {{positive_count}}
- Neutral comments: {{neutral_count}}
- Negative comments: {{negative_count}}

TRANSCRIPT:
{{transcript}}",
        )
    }

    /// System prompt for creator chat, parameterized on available context
    #[must_use]
    pub fn chat_system() -> PromptTemplate {
        PromptTemplate::new(
            r"You are an empathetic and insightful assistant for a YouTube creator, tasked with analyzing their video content and audience feedback to provide personalized advice. You have access to:

- A transcript of the video, reflecting what the creator said.
- Sentiment analysis of comments (positive, neutral, negative percentages).
- An AI-generated analysis report (may be limited or unavailable).

For questions about the creator's mental health, performance, or improvements:
1. Analyze the transcript to assess the creator's tone, energy, topics discussed, and delivery style.
2. Use sentiment data to gauge how the audience perceives the creator.
3. Provide specific, actionable advice tailored to the transcript and sentiment.

Be supportive, positive, and practical, treating the creator as someone seeking growth. If data is missing, acknowledge it directly, saying you don't have that data available, and then provide general best practices.

IMPORTANT: If you don't have enough context to answer about a specific video, DO NOT make up information. Instead, be honest and clear about what data you're missing.

Data provided:
- Transcript: {{transcript_status}}
- Sentiment: {{sentiment_status}}
- Analysis report: {{analysis_status}}",
        )
    }

    /// System prompt for the per-comment sentiment classifier
    #[must_use]
    pub fn classifier_system() -> &'static str {
        "You are a sentiment analysis expert. Analyze the text and classify it as \
         'positive', 'negative', or 'neutral'. Respond with ONLY the sentiment \
         label and nothing else."
    }

    /// User prompt for the per-comment sentiment classifier
    #[must_use]
    pub fn classify(text: &str) -> String {
        format!("Analyze the sentiment of this text: \"{text}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_variables() {
        let template = PromptTemplate::new("Hello {{name}}, you are {{age}} years old.");
        assert_eq!(template.variables(), &["name", "age"]);
    }

    #[test]
    fn test_template_render() {
        let template = PromptTemplate::new("Hello {{name}}!");
        let mut values = HashMap::new();
        values.insert("name".to_string(), "Alice".to_string());
        assert_eq!(template.render(&values), "Hello Alice!");
    }

    #[test]
    fn test_health_report_variables_present() {
        let template = ReportPrompts::health_report();
        let vars = template.variables();
        for expected in [
            "transcript_sentiment",
            "emotional_state",
            "burnout_risk",
            "comment_count",
            "community_support",
            "transcript_note",
        ] {
            assert!(vars.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_classify_embeds_text() {
        let prompt = ReportPrompts::classify("great video");
        assert!(prompt.contains("great video"));
    }
}
