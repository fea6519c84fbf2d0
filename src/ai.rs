//! The endpoint that forwards a transaction sample to an AI completion
//! provider for a natural-language summary.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, Error, auth::Claims};

/// The chat completion endpoint of the AI provider.
const COMPLETIONS_URL: &str = "https://api.together.xyz/v1/chat/completions";

/// The chat model used for analysis.
const MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// At most this many transactions are included in the prompt.
const SAMPLE_LIMIT: usize = 20;

/// A request for an AI analysis of some transactions.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// The question to ask about the transactions.
    #[serde(default)]
    pub question: String,
    /// The transactions to analyze, as the client's own JSON records.
    #[serde(default)]
    pub transactions: Vec<Value>,
}

/// Handle a request to analyze a transaction sample with the AI provider.
///
/// The transactions are relayed as the client sent them rather than read
/// from the database, so the client controls exactly what the provider
/// sees. Only the first [SAMPLE_LIMIT] records are included.
///
/// # Errors
/// Returns an [Error::InvalidAnalysisRequest] if the question or the
/// transaction list is empty, an [Error::AnalysisUnavailable] if no provider
/// API key is configured, or an [Error::AnalysisFailed] if the provider call
/// failed.
pub async fn analyze_transactions(
    State(state): State<AppState>,
    _claims: Claims,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Value>, Error> {
    if request.question.trim().is_empty() {
        return Err(Error::InvalidAnalysisRequest("question is required"));
    }

    if request.transactions.is_empty() {
        return Err(Error::InvalidAnalysisRequest("transactions are required"));
    }

    let Some(api_key) = &state.ai_api_key else {
        return Err(Error::AnalysisUnavailable);
    };

    let prompt = build_prompt(&request.question, &request.transactions);

    let response = reqwest::Client::new()
        .post(COMPLETIONS_URL)
        .bearer_auth(api_key)
        .json(&json!({
            "model": MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": 400,
            "temperature": 0.7,
        }))
        .send()
        .await
        .map_err(|error| Error::AnalysisFailed(error.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::AnalysisFailed(format!(
            "provider returned {}",
            response.status()
        )));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|error| Error::AnalysisFailed(error.to_string()))?;

    let summary = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| Error::AnalysisFailed("provider response had no content".to_string()))?
        .to_string();

    Ok(Json(json!({"summary": summary})))
}

/// Build the chat prompt from the question and a capped transaction sample.
fn build_prompt(question: &str, transactions: &[Value]) -> String {
    let sample_size = transactions.len().min(SAMPLE_LIMIT);
    let sample = serde_json::to_string(&transactions[..sample_size]).unwrap_or_default();

    format!(
        "You are a financial analyst. Here is a sample of {sample_size} transactions \
        from a personal finance dashboard:\n{sample}\n\n\
        Answer the following question about these transactions concisely:\n{question}"
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{SAMPLE_LIMIT, build_prompt};

    #[test]
    fn prompt_includes_question_and_sample() {
        let transactions = vec![json!({"amount": 100.0, "category": "Revenue"})];

        let prompt = build_prompt("What did I spend the most on?", &transactions);

        assert!(prompt.contains("What did I spend the most on?"));
        assert!(prompt.contains("\"category\":\"Revenue\""));
        assert!(prompt.contains("sample of 1 transactions"));
    }

    #[test]
    fn prompt_caps_the_sample_size() {
        let transactions: Vec<_> = (0..50).map(|index| json!({"amount": index})).collect();

        let prompt = build_prompt("Any trends?", &transactions);

        assert!(prompt.contains(&format!("sample of {SAMPLE_LIMIT} transactions")));
        assert!(prompt.contains("\"amount\":19"));
        assert!(!prompt.contains("\"amount\":20"));
    }
}
