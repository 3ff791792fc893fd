use anyhow::{bail, Context, Result};
use log::debug;
use std::{collections::HashMap, io::Read, path::Path};

const LAPLACE_SMOOTHING: f64 = 1.0;
const TOP_K: usize = 5;

/// Count tables built by one pass over the training data. Immutable once
/// constructed; prediction only reads them.
#[derive(Debug)]
pub struct Model {
    disease_counts: HashMap<String, u32>,
    symptom_counts: HashMap<String, HashMap<String, u32>>,
    treatments: HashMap<String, String>,
    total_cases: u32,
}

/// One ranked prediction: the disease, its unnormalized prior-times-likelihood
/// score, and the treatment recorded for it (if any).
pub struct Prediction {
    pub disease: String,
    pub score: f64,
    pub treatment: Option<String>,
}

fn canonical(token: &str) -> String {
    token.trim().to_lowercase()
}

impl Model {
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("failed to open training data at {}", path.display()))?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_reader(source))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut disease_counts = HashMap::new();
        let mut symptom_counts: HashMap<String, HashMap<String, u32>> = HashMap::new();
        let mut treatments: HashMap<String, String> = HashMap::new();
        let mut total_cases = 0u32;

        // Accumulate the count tables. Rows are id,disease,symptoms,treatment;
        // the header line is discarded by the reader.
        for record in reader.records() {
            let record = record?;
            if record.len() < 4 {
                debug!("skipping training row with {} fields", record.len());
                continue;
            }

            let disease = canonical(record.get(1).context("csv record missing disease entry.")?);
            let symptom_field = record.get(2).context("csv record missing symptoms entry.")?;
            let treatment = record
                .get(3)
                .context("csv record missing treatment entry.")?
                .trim();

            *disease_counts.entry(disease.clone()).or_insert(0) += 1;

            // First treatment seen for a disease wins; later rows never overwrite.
            treatments
                .entry(disease.clone())
                .or_insert_with(|| treatment.to_string());

            // Symptoms are ;-separated. A token repeated within one row counts
            // once per occurrence.
            for token in symptom_field.split(';') {
                let symptom = canonical(token);
                if symptom.is_empty() {
                    continue;
                }
                *symptom_counts
                    .entry(symptom)
                    .or_default()
                    .entry(disease.clone())
                    .or_insert(0) += 1;
            }

            total_cases += 1;
        }

        if total_cases == 0 {
            bail!("training data contained no usable rows");
        }

        Ok(Model {
            disease_counts,
            symptom_counts,
            treatments,
            total_cases,
        })
    }

    pub fn total_cases(&self) -> u32 {
        self.total_cases
    }

    pub fn num_diseases(&self) -> usize {
        self.disease_counts.len()
    }

    /// Scores every known disease against the query symptoms and returns the
    /// top 5 (fewer if fewer diseases exist), highest score first. Query
    /// tokens are canonicalized here, so callers may pass raw user input.
    pub fn predict(&self, query_symptoms: &[String]) -> Vec<Prediction> {
        if self.disease_counts.is_empty() {
            return Vec::new();
        }

        let total = f64::from(self.total_cases);
        let num_diseases = self.disease_counts.len() as f64;
        let query: Vec<String> = query_symptoms.iter().map(|s| canonical(s)).collect();

        let mut ranked: Vec<Prediction> = self
            .disease_counts
            .iter()
            .map(|(disease, &count)| {
                let count = f64::from(count);
                let prior =
                    (count + LAPLACE_SMOOTHING) / (total + num_diseases * LAPLACE_SMOOTHING);

                // A symptom never seen for this disease contributes the smoothed
                // floor, never zero.
                let likelihood = query.iter().fold(1.0, |acc, symptom| {
                    let observed = self
                        .symptom_counts
                        .get(symptom)
                        .and_then(|per_disease| per_disease.get(disease))
                        .copied()
                        .unwrap_or(0);
                    acc * (f64::from(observed) + LAPLACE_SMOOTHING)
                        / (count + 2.0 * LAPLACE_SMOOTHING)
                });

                Prediction {
                    disease: disease.clone(),
                    score: prior * likelihood,
                    treatment: self.treatments.get(disease).cloned(),
                }
            })
            .collect();

        // Score descending, ties by name so the ordering is deterministic.
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.disease.cmp(&b.disease))
        });
        ranked.truncate(TOP_K);
        ranked
    }
}
