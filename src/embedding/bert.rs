use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Label names used when a classifier's `config.json` carries no `id2label`.
pub const DEFAULT_CLASSIFIER_LABELS: [&str; 6] = [
    "toxicity",
    "severe_toxicity",
    "obscene",
    "threat",
    "insult",
    "identity_attack",
];

#[derive(Deserialize)]
struct LabelMap {
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

fn read_config(model_dir: &Path) -> Result<(Config, String)> {
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    let config: Config = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
    Ok((config, config_content))
}

fn mmap_weights(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = model_dir.join("model.safetensors");
    // SAFETY: the weights file is treated as read-only for the life of the process.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }
}

/// Checkpoint prefix holding the encoder weights (`bert.`, `roberta.` or none).
fn encoder_prefix(vb: &VarBuilder) -> Option<&'static str> {
    ["bert", "roberta"]
        .into_iter()
        .find(|prefix| vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight")))
}

fn encoder_vb<'a>(vb: &VarBuilder<'a>) -> VarBuilder<'a> {
    match encoder_prefix(vb) {
        Some(prefix) => vb.pp(prefix),
        None => vb.clone(),
    }
}

fn load_bert(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    BertModel::load(encoder_vb(vb), config)
}

/// `pooler.dense` of a sequence-classification checkpoint, if it ships one.
fn load_pooler(vb: &VarBuilder, hidden_size: usize) -> Result<Option<Linear>> {
    let pooler = encoder_vb(vb).pp("pooler.dense");
    if !pooler.contains_tensor("weight") {
        return Ok(None);
    }
    candle_nn::linear(hidden_size, hidden_size, pooler).map(Some)
}

/// `tanh(pooler(cls))`, or the raw CLS state when there is no pooler.
fn pool_cls(pooler: Option<&Linear>, cls: &Tensor) -> Result<Tensor> {
    match pooler {
        Some(dense) => dense.forward(cls)?.tanh(),
        None => Ok(cls.clone()),
    }
}

/// Orders `id2label` by numeric id; falls back to [`DEFAULT_CLASSIFIER_LABELS`].
fn parse_labels(config_content: &str) -> Vec<String> {
    let map: LabelMap = serde_json::from_str(config_content).unwrap_or(LabelMap {
        id2label: BTreeMap::new(),
    });

    let mut indexed: Vec<(usize, String)> = map
        .id2label
        .into_iter()
        .filter_map(|(id, label)| id.parse::<usize>().ok().map(|id| (id, label)))
        .collect();

    if indexed.is_empty() {
        return DEFAULT_CLASSIFIER_LABELS
            .iter()
            .map(|label| label.to_string())
            .collect();
    }

    indexed.sort_by_key(|(id, _)| *id);
    indexed.into_iter().map(|(_, label)| label).collect()
}

/// Sentence encoder: BERT followed by attention-masked mean pooling.
#[derive(Clone)]
pub struct BertEncoder {
    model: Arc<BertModel>,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let (config, _) = read_config(model_dir)?;
        let vb = mmap_weights(model_dir, device)?;
        let model = load_bert(&vb, &config)?;

        Ok(Self {
            model: Arc::new(model),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns L2-normalised sentence embeddings, shape `[batch, hidden_size]`.
    pub fn embed(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .model
            .forward(input_ids, token_type_ids, Some(attention_mask))?;

        // Padding positions carry zero weight in the mean.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.maximum(1e-9)?;
        let pooled = summed.broadcast_div(&counts)?;

        let norms = pooled.sqr()?.sum_keepdim(1)?.sqrt()?.maximum(1e-12)?;
        pooled.broadcast_div(&norms)
    }
}

struct BertForMultiLabelImpl {
    bert: BertModel,
    pooler: Option<Linear>,
    classifier: Linear,
}

impl BertForMultiLabelImpl {
    fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let bert = load_bert(&vb, config)?;
        let pooler = load_pooler(&vb, config.hidden_size)?;
        let classifier = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            pooler,
            classifier,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        let pooled = pool_cls(self.pooler.as_ref(), &cls_token)?;
        self.classifier.forward(&pooled)
    }
}

/// Multi-label BERT classifier (one independent sigmoid per label).
#[derive(Clone)]
pub struct BertClassifier {
    inner: Arc<BertForMultiLabelImpl>,
    labels: Arc<[String]>,
}

impl BertClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let (config, config_content) = read_config(model_dir)?;
        let labels = parse_labels(&config_content);

        let vb = mmap_weights(model_dir, device)?;
        let model = BertForMultiLabelImpl::load(vb, &config, labels.len())?;

        Ok(Self {
            inner: Arc::new(model),
            labels: labels.into(),
        })
    }

    /// Label names in output column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns per-label probabilities, shape `[batch, num_labels]`.
    pub fn predict(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let logits = self
            .inner
            .forward(input_ids, token_type_ids, attention_mask)?;
        candle_nn::ops::sigmoid(&logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn var_builder(tensors: &[(&str, Tensor)]) -> VarBuilder<'static> {
        let map: HashMap<String, Tensor> = tensors
            .iter()
            .map(|(name, tensor)| (name.to_string(), tensor.clone()))
            .collect();
        VarBuilder::from_tensors(map, DType::F32, &Device::Cpu)
    }

    fn word_embeddings(name: &str) -> (&str, Tensor) {
        (name, Tensor::zeros((4, 2), DType::F32, &Device::Cpu).expect("tensor"))
    }

    fn pooler_weights(prefix: &str) -> Vec<(String, Tensor)> {
        let weight = Tensor::new(&[[1.0f32, 0.0], [0.0, 1.0]], &Device::Cpu).expect("weight");
        let bias = Tensor::new(&[0.5f32, -0.5], &Device::Cpu).expect("bias");
        vec![
            (format!("{prefix}pooler.dense.weight"), weight),
            (format!("{prefix}pooler.dense.bias"), bias),
        ]
    }

    #[test]
    fn test_encoder_prefix_detection() {
        let vb = var_builder(&[word_embeddings("bert.embeddings.word_embeddings.weight")]);
        assert_eq!(encoder_prefix(&vb), Some("bert"));

        let vb = var_builder(&[word_embeddings("roberta.embeddings.word_embeddings.weight")]);
        assert_eq!(encoder_prefix(&vb), Some("roberta"));

        let vb = var_builder(&[word_embeddings("embeddings.word_embeddings.weight")]);
        assert_eq!(encoder_prefix(&vb), None);
    }

    #[test]
    fn test_classifier_applies_tanh_pooler() {
        let pooler = pooler_weights("bert.");
        let mut tensors = vec![word_embeddings("bert.embeddings.word_embeddings.weight")];
        tensors.extend(pooler.iter().map(|(name, t)| (name.as_str(), t.clone())));
        let vb = var_builder(&tensors);

        let dense = load_pooler(&vb, 2).expect("load").expect("pooler present");
        let cls = Tensor::new(&[[1.0f32, 2.0]], &Device::Cpu).expect("cls");
        let pooled = pool_cls(Some(&dense), &cls)
            .expect("pool")
            .to_vec2::<f32>()
            .expect("vec");

        let expected = 1.5f32.tanh();
        assert!((pooled[0][0] - expected).abs() < 1e-5, "{:?}", pooled);
        assert!((pooled[0][1] - expected).abs() < 1e-5, "{:?}", pooled);
    }

    #[test]
    fn test_unprefixed_pooler_is_found() {
        let pooler = pooler_weights("");
        let tensors: Vec<(&str, Tensor)> = pooler
            .iter()
            .map(|(name, t)| (name.as_str(), t.clone()))
            .collect();
        let vb = var_builder(&tensors);
        assert!(load_pooler(&vb, 2).expect("load").is_some());
    }

    #[test]
    fn test_missing_pooler_keeps_raw_cls() {
        let vb = var_builder(&[word_embeddings("bert.embeddings.word_embeddings.weight")]);
        let pooler = load_pooler(&vb, 2).expect("load");
        assert!(pooler.is_none());

        let cls = Tensor::new(&[[3.0f32, -4.0]], &Device::Cpu).expect("cls");
        let pooled = pool_cls(pooler.as_ref(), &cls).expect("pool");
        assert_eq!(pooled.to_vec2::<f32>().expect("vec"), vec![vec![3.0, -4.0]]);
    }

    #[test]
    fn test_parse_labels_orders_by_id() {
        let config = r#"{"id2label": {"1": "severe_toxic", "0": "toxic", "10": "late", "2": "obscene"}}"#;
        assert_eq!(
            parse_labels(config),
            vec!["toxic", "severe_toxic", "obscene", "late"]
        );
    }

    #[test]
    fn test_parse_labels_defaults_when_missing() {
        let labels = parse_labels(r#"{"hidden_size": 768}"#);
        assert_eq!(labels.len(), DEFAULT_CLASSIFIER_LABELS.len());
        assert_eq!(labels[0], "toxicity");
    }

    #[test]
    fn test_parse_labels_ignores_non_numeric_ids() {
        let labels = parse_labels(r#"{"id2label": {"x": "bogus", "0": "toxic"}}"#);
        assert_eq!(labels, vec!["toxic"]);
    }
}
