use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use class_timetabler::parser::{load_config_or_default, load_request_from_dir, validate_request};
use class_timetabler::reporter::{
    generate_json_summary, generate_reports, print_summary, OutputFormat,
};
use class_timetabler::scheduler::generate_timetable;
use class_timetabler::types::Timetable;
use class_timetabler::validator::find_conflicts;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "class-timetabler")]
#[command(about = "Constraint-based weekly class timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demo with sample data
    Demo,

    /// Generate a timetable from input data
    Schedule {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for timetable files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-run the conflict walker over a saved timetable
    Validate {
        /// Path to timetable.json file
        #[arg(short, long)]
        timetable: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Schedule {
            data,
            output,
            format,
            quiet,
        } => run_schedule(&data, &output, &format, quiet),
        Commands::Validate { timetable } => run_validate(&timetable),
    }
}

fn run_demo() -> Result<()> {
    println!("{}", "Class Timetabler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    let output_path = PathBuf::from("output");

    if !demo_path.join("subjects.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    println!("Loading demo data from: {}", demo_path.display());
    let request = load_request_from_dir(&demo_path).context("Failed to load demo data")?;

    let validation = validate_request(&request)?;
    for warning in &validation.warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }

    println!(
        "Loaded {} subjects, {} teachers, {} rooms",
        request.subjects.len(),
        request.teachers.len(),
        request.rooms.len()
    );

    println!("\nGenerating timetable...\n");
    let config = load_config_or_default(&demo_path.join("config.toml"));
    let timetable = generate_timetable(&request, &config, false);

    print_summary(&timetable);

    generate_reports(
        &timetable,
        &output_path,
        &[OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text],
    )?;
    println!(
        "Reports written to: {}",
        output_path.display().to_string().green()
    );

    Ok(())
}

fn run_schedule(data: &PathBuf, output: &PathBuf, format: &str, quiet: bool) -> Result<()> {
    let request = load_request_from_dir(data).context("Failed to load input data")?;

    if !quiet {
        let validation = validate_request(&request)?;
        for warning in &validation.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} subjects, {} teachers, {} rooms",
            request.subjects.len(),
            request.teachers.len(),
            request.rooms.len()
        );
    }

    let config = load_config_or_default(&data.join("config.toml"));
    let timetable = generate_timetable(&request, &config, quiet);

    let formats = parse_formats(format);
    generate_reports(&timetable, output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary(&timetable)?);
    } else {
        print_summary(&timetable);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(timetable_path: &PathBuf) -> Result<()> {
    let json = std::fs::read_to_string(timetable_path)
        .with_context(|| format!("Failed to read {}", timetable_path.display()))?;
    let timetable: Timetable = serde_json::from_str(&json)?;

    let conflicts = find_conflicts(&timetable.schedule);

    if conflicts.is_empty() {
        println!("{}", "✓ No residual conflicts".green().bold());
    } else {
        println!("{}", "✗ Residual conflicts found".red().bold());
        for conflict in &conflicts {
            println!("  - {}", conflict);
        }
    }

    println!(
        "\n{} meetings checked, {} conflicts",
        timetable.schedule.len(),
        conflicts.len()
    );

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    // Subjects
    let subjects = serde_json::json!([
        {"subject_code": "CS1", "subject_name": "Introduction to Computing", "program": "CS",
         "year_level": 1, "semester": 1, "lecture_hours_per_week": 3.0, "lab_hours_per_week": 0.0},
        {"subject_code": "CS2", "subject_name": "Computer Programming 1", "program": "CS",
         "year_level": 1, "semester": 1, "lecture_hours_per_week": 2.0, "lab_hours_per_week": 3.0},
        {"subject_code": "CS6", "subject_name": "Data Communications and Networking", "program": "CS",
         "year_level": 1, "semester": 1, "lecture_hours_per_week": 2.0, "lab_hours_per_week": 3.0},
        {"subject_code": "PE1", "subject_name": "Physical Fitness", "program": "CS",
         "available_programs": ["IT"],
         "year_level": 1, "semester": 1, "lecture_hours_per_week": 2.0, "lab_hours_per_week": 0.0},
        {"subject_code": "IT1", "subject_name": "IT Fundamentals", "program": "IT",
         "year_level": 1, "semester": 1, "lecture_hours_per_week": 3.0, "lab_hours_per_week": 0.0},
        {"subject_code": "IT2", "subject_name": "Web Systems 1", "program": "IT",
         "year_level": 1, "semester": 1, "lecture_hours_per_week": 2.0, "lab_hours_per_week": 3.0}
    ]);
    std::fs::write(
        path.join("subjects.json"),
        serde_json::to_string_pretty(&subjects)?,
    )?;

    // Teachers
    let teachers = serde_json::json!([
        {"teacher_id": 1, "teacher_name": "Ms. Reyes", "can_teach": "CS1, CS2"},
        {"teacher_id": 2, "teacher_name": "Mr. Cruz", "can_teach": "CS6, IT2"},
        {"teacher_id": 3, "teacher_name": "Coach Diaz", "can_teach": "PE1"},
        {"teacher_id": 4, "teacher_name": "Ms. Lim", "can_teach": "IT1",
         "availability_days": ["Mon", "Tue", "Wed", "Thu"]},
        {"teacher_id": 5, "teacher_name": "Mr. Tan", "can_teach": "CS1, IT1"}
    ]);
    std::fs::write(
        path.join("teachers.json"),
        serde_json::to_string_pretty(&teachers)?,
    )?;

    // Rooms
    let rooms = serde_json::json!([
        {"room_id": "201", "room_name": "Room 201", "is_laboratory": false},
        {"room_id": "202", "room_name": "Room 202", "is_laboratory": false},
        {"room_id": "203", "room_name": "Room 203", "is_laboratory": false},
        {"room_id": "lab1", "room_name": "Computer Lab 1", "is_laboratory": true},
        {"room_id": "lab2", "room_name": "Computer Lab 2", "is_laboratory": true},
        {"room_id": "cisco", "room_name": "Cisco Lab", "is_laboratory": true},
        {"room_id": "gym", "room_name": "LPU_Gymnasium", "is_laboratory": false}
    ]);
    std::fs::write(
        path.join("rooms.json"),
        serde_json::to_string_pretty(&rooms)?,
    )?;

    // Demand
    let demand = serde_json::json!({
        "semester": 1,
        "programs": ["CS", "IT"],
        "sections": {"CS": {"1": 2}, "IT": {"1": 1}}
    });
    std::fs::write(
        path.join("demand.json"),
        serde_json::to_string_pretty(&demand)?,
    )?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
