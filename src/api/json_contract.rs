use serde::{Deserialize, Serialize};

use crate::core::Sample;
use crate::error::{PlotError, PlotResult};
use crate::render::Renderer;

use super::validation::validate_plot_config;
use super::{PlotConfig, PlotViewport};

pub const PLOT_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: PlotConfig,
}

impl PlotConfig {
    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = PlotConfigJsonContractV1 {
            schema_version: PLOT_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize plot config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract payload, then
    /// validates the result.
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        let config = match serde_json::from_str::<PlotConfig>(input) {
            Ok(config) => config,
            Err(_) => {
                let payload: PlotConfigJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        PlotError::InvalidData(format!(
                            "failed to parse plot config json payload: {e}"
                        ))
                    })?;
                if payload.schema_version != PLOT_CONFIG_JSON_SCHEMA_V1 {
                    return Err(PlotError::InvalidData(format!(
                        "unsupported plot config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
        };
        validate_plot_config(&config)?;
        Ok(config)
    }
}

impl<R: Renderer, S: Sample> PlotViewport<R, S> {
    /// Current live configuration as a versioned JSON contract.
    pub fn config_json_contract_v1_pretty(&self) -> PlotResult<String> {
        self.config().to_json_contract_v1_pretty()
    }
}
