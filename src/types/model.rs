use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents a model identifier on the SambaNova Cloud API.
///
/// This can be a predefined model or a custom string value for models that
/// may be added in the future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions.
    Known(KnownModel),

    /// Custom model identifier (for future or private deployments).
    Custom(String),
}

/// Known models served by the SambaNova Cloud API.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// DeepSeek-R1, the reasoning model this client was built around.
    #[serde(rename = "DeepSeek-R1")]
    DeepSeekR1,

    /// DeepSeek-R1 distilled onto Llama 3.3 70B.
    #[serde(rename = "DeepSeek-R1-Distill-Llama-70B")]
    DeepSeekR1DistillLlama70B,

    /// DeepSeek-V3 (2024-03-24 refresh).
    #[serde(rename = "DeepSeek-V3-0324")]
    DeepSeekV30324,

    /// Meta Llama 3.3 70B Instruct.
    #[serde(rename = "Meta-Llama-3.3-70B-Instruct")]
    MetaLlama3370BInstruct,

    /// Qwen3 32B.
    #[serde(rename = "Qwen3-32B")]
    Qwen332B,
}

impl Model {
    /// Parses a model name, falling back to a custom identifier for names
    /// this crate does not know about.
    pub fn from_name(name: &str) -> Self {
        name.parse::<KnownModel>()
            .map(Model::Known)
            .unwrap_or_else(|_| Model::Custom(name.to_string()))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::DeepSeekR1 => write!(f, "DeepSeek-R1"),
            KnownModel::DeepSeekR1DistillLlama70B => write!(f, "DeepSeek-R1-Distill-Llama-70B"),
            KnownModel::DeepSeekV30324 => write!(f, "DeepSeek-V3-0324"),
            KnownModel::MetaLlama3370BInstruct => write!(f, "Meta-Llama-3.3-70B-Instruct"),
            KnownModel::Qwen332B => write!(f, "Qwen3-32B"),
        }
    }
}

impl FromStr for KnownModel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DeepSeek-R1" => Ok(KnownModel::DeepSeekR1),
            "DeepSeek-R1-Distill-Llama-70B" => Ok(KnownModel::DeepSeekR1DistillLlama70B),
            "DeepSeek-V3-0324" => Ok(KnownModel::DeepSeekV30324),
            "Meta-Llama-3.3-70B-Instruct" => Ok(KnownModel::MetaLlama3370BInstruct),
            "Qwen3-32B" => Ok(KnownModel::Qwen332B),
            _ => Err(()),
        }
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::from_name(&model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::from_name(model)
    }
}
