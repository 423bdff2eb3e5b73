//! Deterministic mock payloads used when credentials are absent.
//!
//! Each function fabricates the same JSON shape a live call would return.
//! Payloads are fully deterministic (fixed ids, no timestamps) and echo
//! the query text literally so downstream normalization can be exercised
//! and asserted against without a network dependency.

use serde_json::{Value, json};

/// Mock reply of the session chat API.
pub fn session_reply(query_text: &str) -> Value {
    json!({
        "id": "chat_mock_00000001",
        "turns": [
            {
                "id": "turn_mock_00000001",
                "query": query_text,
                "answer": format!("Mock response for: {query_text}"),
                "enabled": true,
                "search_results": []
            }
        ],
        "enabled": true
    })
}

/// Mock reply of the legacy query+summary API.
pub fn legacy_reply(query_text: &str) -> Value {
    json!({
        "responseSet": [
            {
                "summary": [
                    {
                        "text": format!(
                            "This is a mock response to your query: '{query_text}'. \
                             In a real deployment this summary is generated by the \
                             hosted service from the document corpus; the system is \
                             running in mock mode because credentials are not \
                             configured."
                        ),
                        "status": [{"code": "OK", "statusDetail": "mock summary"}]
                    }
                ],
                "response": [
                    {
                        "text": "Sample document content that would be relevant to the query.",
                        "score": 0.85,
                        "metadata": [
                            {"name": "title", "value": "Sample Document"},
                            {"name": "source", "value": "mock_data"}
                        ]
                    }
                ]
            }
        ]
    })
}

/// Mock receipt for document ingestion.
pub fn ingest_receipt(document_id: &str, title: &str) -> Value {
    json!({
        "status": "success",
        "document_id": document_id,
        "title": title,
        "message": "Document ingested successfully (mock mode)"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reply_echoes_query_deterministically() {
        let a = session_reply("what are the loan limits?");
        let b = session_reply("what are the loan limits?");
        assert_eq!(a, b);
        assert_eq!(
            a["turns"][0]["answer"],
            "Mock response for: what are the loan limits?"
        );
        assert_eq!(a["id"], "chat_mock_00000001");
    }

    #[test]
    fn legacy_reply_carries_summary_and_match() {
        let v = legacy_reply("interest rates");
        let summary = v["responseSet"][0]["summary"][0]["text"].as_str().unwrap();
        assert!(summary.contains("'interest rates'"));
        assert_eq!(v["responseSet"][0]["response"][0]["score"], 0.85);
    }
}
