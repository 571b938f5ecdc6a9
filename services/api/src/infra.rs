use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use toolstack::catalog::{CatalogCsvImporter, CatalogRepository, CatalogSeed, InMemoryCatalog};
use toolstack::config::{CatalogConfig, RecorderConfig};
use toolstack::error::AppError;
use toolstack::quiz::{
    CsvResponseLog, QuizResponseRecord, RecorderError, ResponseDispatcher, ResponseId,
    ResponseRecorder, StepOption,
};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) responses: ResponseDispatcher,
}

/// Response sink used when no log file is configured.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResponseLog {
    records: Arc<Mutex<Vec<QuizResponseRecord>>>,
}

impl ResponseRecorder for InMemoryResponseLog {
    fn record(&self, record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
        let mut guard = self.records.lock().expect("response log mutex poisoned");
        guard.push(record.clone());
        Ok(ResponseId(guard.len() as u64))
    }
}

impl InMemoryResponseLog {
    #[cfg(test)]
    pub(crate) fn records(&self) -> Vec<QuizResponseRecord> {
        self.records
            .lock()
            .expect("response log mutex poisoned")
            .clone()
    }
}

/// Seed catalog (built-in or configured), with its tools replaced by the CSV export when present.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<InMemoryCatalog, AppError> {
    let seed = match &config.seed_json {
        Some(path) => {
            let seed = CatalogSeed::from_reader(BufReader::new(File::open(path)?))?;
            info!(path = %path.display(), tools = seed.tools.len(), "catalog seed loaded");
            seed
        }
        None => CatalogSeed::standard()?,
    };
    let catalog = InMemoryCatalog::from_seed(seed);

    if let Some(path) = &config.tools_csv {
        let tools = CatalogCsvImporter::from_path(path)?;
        catalog.clear_tools();
        let imported = tools.len();
        for tool in tools {
            catalog.upsert_tool(tool)?;
        }
        info!(path = %path.display(), tools = imported, "catalog tools imported from csv");
    }

    Ok(catalog)
}

pub(crate) fn response_recorder(
    config: &RecorderConfig,
) -> Result<Arc<dyn ResponseRecorder>, AppError> {
    match &config.response_log {
        Some(path) => {
            let log = CsvResponseLog::open(path)?;
            info!(path = %log.path().display(), "quiz responses logged to csv");
            Ok(Arc::new(log))
        }
        None => Ok(Arc::new(InMemoryResponseLog::default())),
    }
}

/// clap value parser for a quiz option, accepting the wire value in any case.
pub(crate) fn parse_option<T: StepOption>(raw: &str) -> Result<T, String> {
    T::parse(raw).ok_or_else(|| {
        let allowed: Vec<&str> = T::all().iter().map(|option| option.value()).collect();
        format!(
            "'{raw}' is not a valid {} answer (expected one of: {})",
            T::STEP.label(),
            allowed.join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolstack::catalog::ToolSlug;
    use toolstack::quiz::{BudgetBracket, Role};

    #[test]
    fn parse_option_accepts_values_and_lists_choices() {
        assert_eq!(parse_option::<Role>(" Developer "), Ok(Role::Developer));
        assert_eq!(
            parse_option::<BudgetBracket>("20-100"),
            Ok(BudgetBracket::From20To100)
        );

        let err = parse_option::<BudgetBracket>("cheap").expect_err("unknown value");
        assert!(err.contains("budget"));
        assert!(err.contains("free, under-20, 20-100, no-limit"));
    }

    #[test]
    fn load_catalog_reads_configured_seed_file() {
        let path = std::env::temp_dir().join(format!(
            "toolstack-seed-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"categories":[{"slug":"developer","name":"Developer"}],
                "tools":[{"id":1,"slug":"forgekit","name":"ForgeKit","category":"developer","monthly_cost":49}]}"#,
        )
        .expect("write seed");

        let config = CatalogConfig {
            seed_json: Some(path.clone()),
            ..CatalogConfig::default()
        };
        let catalog = load_catalog(&config).expect("custom seed loads");
        let _ = std::fs::remove_file(&path);

        let tools = catalog.tools().expect("tools");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].slug, ToolSlug::from("forgekit"));
        assert_eq!(catalog.categories().expect("categories").len(), 1);
    }

    #[test]
    fn load_catalog_defaults_to_seed() {
        let catalog = load_catalog(&CatalogConfig::default()).expect("seed loads");
        let tools = catalog.tools().expect("tools");
        assert_eq!(tools.len(), 18);
        assert!(catalog
            .tool_by_slug(&ToolSlug::from("webflow"))
            .expect("lookup")
            .is_some());
    }
}
