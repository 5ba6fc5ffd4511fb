use clap::Parser;
use course_advisor::domain::model::{CourseWithSections, StudentCourseRecord};
use course_advisor::utils::{logger, validation::Validate};
use course_advisor::{
    AdvisorConfig, AdvisorEngine, CachedCatalog, CliConfig, HttpCurriculumProvider, Result,
    TomlConfig,
};
use std::fs;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting course-advisor CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Schedule mode is pure: no collaborators involved.
    if let Some(schedule_file) = &cli.schedule_file {
        let courses = read_schedule_input(schedule_file)?;
        let combinations = course_advisor::core::schedule::generate(&courses);
        println!("{}", serde_json::to_string_pretty(&combinations)?);
        return Ok(());
    }

    let settings: Box<dyn AdvisorConfig> = match &cli.config {
        Some(path) => Box::new(TomlConfig::from_file(path)?),
        None => Box::new(cli.clone()),
    };

    let courses_file = match cli.courses_file.as_deref() {
        Some(path) => path,
        None => {
            eprintln!("--courses-file is required unless --schedule-file is given");
            std::process::exit(1);
        }
    };
    let courses = read_course_records(courses_file)?;
    tracing::info!("Loaded {} course records from {}", courses.len(), courses_file);

    let provider = HttpCurriculumProvider::new(settings.api_endpoint());
    let catalog = CachedCatalog::new(provider.clone(), settings.catalog_ttl_seconds());
    let engine = AdvisorEngine::new(provider, catalog);

    let validation = engine
        .validate_student_progress(&courses, settings.curriculum_id(), settings.department_id())
        .await;

    let report = match engine
        .calculate_curriculum_progress(&courses, settings.curriculum_id())
        .await
    {
        Ok(progress) => serde_json::json!({
            "validation": validation,
            "progress": progress,
        }),
        Err(e) => {
            tracing::warn!("progress calculation unavailable: {}", e);
            serde_json::json!({ "validation": validation })
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !validation.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

fn read_course_records(path: &str) -> Result<Vec<StudentCourseRecord>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn read_schedule_input(path: &str) -> Result<Vec<CourseWithSections>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
