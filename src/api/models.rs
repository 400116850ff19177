use serde::{Deserialize, Serialize};

/// Shipment total for one mesoregion
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegionTotal {
    pub regiao: String,
    pub embarques: u64,
}

/// Payload of `GET /api/stats`.
///
/// The server answers with either `{error}` (nothing loaded, or filters
/// matched nothing) or the full set of statistics.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StatsResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub total_embarques: Option<u64>,
    #[serde(default)]
    pub total_origens: Option<u32>,
    #[serde(default)]
    pub total_destinos: Option<u32>,
    #[serde(default)]
    pub periodo_inicio: Option<String>,
    #[serde(default)]
    pub periodo_fim: Option<String>,
    #[serde(default)]
    pub top_origens: Vec<RegionTotal>,
    #[serde(default)]
    pub top_destinos: Vec<RegionTotal>,
}

impl StatsResponse {
    /// Absence of `error` means data is loaded
    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}

/// Payload of `POST /api/upload`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_error_payload() {
        let json = r#"{"error": "Nenhum dado carregado"}"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();
        assert!(!stats.is_loaded());
        assert_eq!(stats.error.as_deref(), Some("Nenhum dado carregado"));
        assert!(stats.top_origens.is_empty());
    }

    #[test]
    fn test_stats_full_payload() {
        let json = r#"{
            "total_embarques": 3600,
            "total_origens": 5,
            "total_destinos": 4,
            "periodo_inicio": "01/2023",
            "periodo_fim": "03/2023",
            "top_origens": [{"regiao": "São Paulo", "embarques": 1500}],
            "top_destinos": [{"regiao": "São Paulo", "embarques": 1200}]
        }"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();
        assert!(stats.is_loaded());
        assert_eq!(stats.total_embarques, Some(3600));
        assert_eq!(stats.top_origens[0].regiao, "São Paulo");
        assert_eq!(stats.top_destinos[0].embarques, 1200);
    }

    #[test]
    fn test_upload_response_variants() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"success": true, "message": "Arquivo processado com sucesso"}"#)
                .unwrap();
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed: UploadResponse =
            serde_json::from_str(r#"{"success": false, "error": "Formato de arquivo não suportado"}"#)
                .unwrap();
        assert!(!failed.success);
        assert_eq!(
            failed.error.as_deref(),
            Some("Formato de arquivo não suportado")
        );
    }
}
