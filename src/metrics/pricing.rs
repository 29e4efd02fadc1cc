/// Published USD prices per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

const PRICE_TABLE: &[(&str, ModelPricing)] = &[
    ("gpt-4.1", ModelPricing { input_per_million: 2.0, output_per_million: 8.0 }),
    ("gpt-4.1-mini", ModelPricing { input_per_million: 0.4, output_per_million: 1.6 }),
    ("gpt-4.1-nano", ModelPricing { input_per_million: 0.1, output_per_million: 0.4 }),
    ("gpt-4o", ModelPricing { input_per_million: 2.5, output_per_million: 10.0 }),
    ("gpt-4o-mini", ModelPricing { input_per_million: 0.15, output_per_million: 0.6 }),
];

impl ModelPricing {
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self { input_per_million, output_per_million }
    }

    /// Looks up a model by exact name, falling back to a dated snapshot
    /// prefix (`gpt-4.1-mini-2025-04-14` resolves to `gpt-4.1-mini`).
    pub fn for_model(model: &str) -> Option<Self> {
        let model = model.trim().to_lowercase();
        if let Some((_, pricing)) = PRICE_TABLE.iter().find(|(name, _)| *name == model) {
            return Some(*pricing);
        }
        PRICE_TABLE.iter()
            .filter(|(name, _)| {
                model
                    .strip_prefix(name)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .map(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
                    .unwrap_or(false)
            })
            .max_by_key(|(name, _)| name.len())
            .map(|(_, pricing)| *pricing)
    }

    pub fn cost_usd(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        (prompt_tokens as f64 / 1_000_000.0) * self.input_per_million +
            (completion_tokens as f64 / 1_000_000.0) * self.output_per_million
    }
}
