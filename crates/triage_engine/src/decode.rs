use serde::Deserialize;

use crate::{AnalysisResponse, FailureKind, SubmitError};

/// Union of the success and error bodies. The deployed service answers with
/// Portuguese keys, accepted here as aliases.
#[derive(Debug, Default, Deserialize)]
struct WireBody {
    #[serde(alias = "classificacao")]
    classification: Option<String>,
    #[serde(alias = "analise")]
    analysis: Option<String>,
    #[serde(alias = "resposta")]
    reply: Option<String>,
    #[serde(alias = "confianca")]
    confidence: Option<serde_json::Value>,
    #[serde(alias = "palavras_chave")]
    keywords: Option<serde_json::Value>,
    #[serde(alias = "erro")]
    error: Option<String>,
    #[serde(alias = "detalhes")]
    details: Option<String>,
}

/// Map a status code and raw body to a result.
///
/// An `error` field wins over everything else, even on a 2xx status. A non-2xx
/// status without a parseable error body is a plain HTTP failure.
pub fn decode_response(status: u16, body: &[u8]) -> Result<AnalysisResponse, SubmitError> {
    let success = (200..300).contains(&status);
    let parsed = serde_json::from_slice::<WireBody>(body);

    let wire = match parsed {
        Ok(wire) => wire,
        Err(err) if success => {
            return Err(SubmitError::new(
                FailureKind::MalformedResponse,
                err.to_string(),
            ))
        }
        Err(_) => {
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status),
                format!("status {status} without a readable body"),
            ))
        }
    };

    if wire.error.is_some() {
        let message = non_blank(&wire.details)
            .or_else(|| non_blank(&wire.error))
            .unwrap_or_default()
            .to_string();
        return Err(SubmitError::new(
            FailureKind::Service {
                status,
                error: wire.error,
                details: wire.details,
            },
            message,
        ));
    }

    if !success {
        return Err(SubmitError::new(
            FailureKind::HttpStatus(status),
            format!("status {status}"),
        ));
    }

    match (wire.classification, wire.analysis, wire.reply) {
        (Some(classification), Some(analysis), Some(reply)) => Ok(AnalysisResponse {
            classification,
            analysis,
            reply,
            confidence: wire.confidence.as_ref().and_then(confidence_score),
            keywords: wire.keywords.as_ref().map(keyword_list).unwrap_or_default(),
        }),
        _ => Err(SubmitError::new(
            FailureKind::MalformedResponse,
            "missing classification, analysis or reply",
        )),
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}

/// Keywords arrive as a list or, from looser models, as one comma-separated
/// string. Anything else is ignored.
fn keyword_list(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
        serde_json::Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn confidence_score(value: &serde_json::Value) -> Option<u8> {
    let score = match value {
        serde_json::Value::Number(number) => number.as_f64()?,
        serde_json::Value::String(text) => text.trim().trim_end_matches('%').parse().ok()?,
        _ => return None,
    };
    Some(score.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_portuguese_keys() {
        let body = br#"{"classificacao":"Produtivo","analise":"Pede status","resposta":"Ola","confianca":92,"palavras_chave":["status","pedido"]}"#;
        let response = decode_response(200, body).unwrap();
        assert_eq!(response.classification, "Produtivo");
        assert_eq!(response.reply, "Ola");
        assert_eq!(response.confidence, Some(92));
        assert_eq!(response.keywords, vec!["status", "pedido"]);
    }

    #[test]
    fn error_marker_on_ok_status_is_service_failure() {
        let body = br#"{"error":"bad_input","details":"empty file"}"#;
        let err = decode_response(200, body).unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::Service {
                status: 200,
                error: Some("bad_input".into()),
                details: Some("empty file".into()),
            }
        );
        assert_eq!(err.message, "empty file");
    }

    #[test]
    fn error_status_with_error_body_keeps_server_message() {
        let body = br#"{"erro":"Formato de arquivo nao suportado"}"#;
        let err = decode_response(400, body).unwrap_err();
        assert!(err.is_service_error());
        assert_eq!(err.message, "Formato de arquivo nao suportado");
    }

    #[test]
    fn error_status_without_body_is_http_failure() {
        let err = decode_response(502, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(502));
    }

    #[test]
    fn incomplete_success_body_is_malformed() {
        let err = decode_response(200, br#"{"classification":"Productive"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);

        let err = decode_response(200, b"not json").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn loose_keywords_do_not_reject_verdict() {
        let body = br#"{"classificacao":"Produtivo","analise":"x","resposta":"y","palavras_chave":"fatura, prazo"}"#;
        let response = decode_response(200, body).unwrap();
        assert_eq!(response.keywords, vec!["fatura", "prazo"]);

        let body = br#"{"classification":"Productive","analysis":"x","reply":"y","keywords":["ok",3,null]}"#;
        assert_eq!(decode_response(200, body).unwrap().keywords, vec!["ok"]);

        let body = br#"{"classification":"Productive","analysis":"x","reply":"y","keywords":{"a":1}}"#;
        assert!(decode_response(200, body).unwrap().keywords.is_empty());
    }

    #[test]
    fn blank_details_fall_back_to_error() {
        let err = decode_response(200, br#"{"error":"bad_input","details":" "}"#).unwrap_err();
        assert_eq!(err.message, "bad_input");
    }

    #[test]
    fn confidence_accepts_strings_and_clamps() {
        assert_eq!(confidence_score(&serde_json::json!("75%")), Some(75));
        assert_eq!(confidence_score(&serde_json::json!(140.2)), Some(100));
        assert_eq!(confidence_score(&serde_json::json!(null)), None);
    }
}
