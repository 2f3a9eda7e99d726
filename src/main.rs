//! Mortgage simulator CLI
//!
//! Loads a stored simulation, prices it and prints the summary. Optionally writes the
//! full schedule to CSV or dumps the whole result as JSON.

use anyhow::{Context, Result};
use bbp_mortgage::{
    calendar::installment_dates,
    input::{CsvSimulationSource, SimulationSource},
    ScheduleRow, SimulationConfig, SimulationEngine, SimulationResult,
};
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Price a Bono del Buen Pagador mortgage simulation
#[derive(Parser)]
#[command(name = "bbp-sim", version, about)]
struct Cli {
    /// CSV export of stored simulations
    #[arg(long, default_value = "data/simulations.csv")]
    input: PathBuf,

    /// Simulation id to price
    #[arg(long)]
    id: u32,

    /// Override the client's COK (annual effective, decimal)
    #[arg(long)]
    cok: Option<f64>,

    /// Disbursement date (YYYY-MM-DD); defaults to the stored one
    #[arg(long)]
    disbursement: Option<NaiveDate>,

    /// Write the full schedule to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full result as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Number of schedule rows shown in the text summary
    #[arg(long, default_value_t = 12)]
    preview: usize,
}

/// Schedule row as exported, with its due date when known
#[derive(Serialize)]
struct ExportRow<'a> {
    month: u32,
    due_date: Option<String>,
    phase: &'a str,
    opening_balance: f64,
    interest: f64,
    amortization: f64,
    desgravamen: f64,
    property_insurance: f64,
    fixed_charge: f64,
    admin_expense: f64,
    installment: f64,
    closing_balance: f64,
    cash_flow: f64,
}

impl<'a> ExportRow<'a> {
    fn new(row: &'a ScheduleRow, due_date: Option<NaiveDate>) -> Self {
        Self {
            month: row.month,
            due_date: due_date.map(|d| d.to_string()),
            phase: match row.phase {
                bbp_mortgage::PaymentPhase::Grace => "Grace",
                bbp_mortgage::PaymentPhase::Amortization => "Amortization",
            },
            opening_balance: row.opening_balance,
            interest: row.interest,
            amortization: row.amortization,
            desgravamen: row.desgravamen_premium,
            property_insurance: row.property_insurance_premium,
            fixed_charge: row.fixed_charge,
            admin_expense: row.admin_expense,
            installment: row.installment,
            closing_balance: row.closing_balance,
            cash_flow: row.borrower_flow(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = CsvSimulationSource::new(cli.input.clone());
    let stored = source
        .fetch(cli.id)
        .with_context(|| {
            format!(
                "Unable to load simulation {} from {}",
                cli.id,
                cli.input.display()
            )
        })?;
    info!("Loaded simulation {} from {}", stored.simulation_id, cli.input.display());

    let cok = cli.cok.unwrap_or(stored.cok_annual);
    let engine = SimulationEngine::new(SimulationConfig::from_env());
    let result = engine
        .simulate(&stored.input, cok)
        .with_context(|| format!("Simulation {} could not be priced", stored.simulation_id))?;

    let disbursement = cli.disbursement.or(stored.disbursement_date);
    let due_dates = match disbursement {
        Some(date) => Some(installment_dates(date, stored.input.term_months)?),
        None => None,
    };

    if let Some(path) = &cli.output {
        write_schedule(path, &result, due_dates.as_deref())?;
        info!("Schedule written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(stored.simulation_id, &result, due_dates.as_deref(), cli.preview);
    }

    Ok(())
}

fn write_schedule(
    path: &Path,
    result: &SimulationResult,
    due_dates: Option<&[NaiveDate]>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;

    for (i, row) in result.schedule.rows.iter().enumerate() {
        let due = due_dates.and_then(|d| d.get(i).copied());
        writer.serialize(ExportRow::new(row, due))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(
    id: u32,
    result: &SimulationResult,
    due_dates: Option<&[NaiveDate]>,
    preview: usize,
) {
    let s = &result.summary;

    println!("Simulation {}", id);
    println!("==============\n");
    println!("  TEM:                {:.5}%", s.monthly_effective_rate * 100.0);
    println!("  Financed principal: {:.2}", s.financed_principal);
    println!("  Base installment:   {:.2}", s.base_installment);
    if s.balloon_payment > 0.0 {
        println!("  Balloon payment:    {:.2}", s.balloon_payment);
    }
    println!("  Grace:              {}", s.grace_description);
    println!("  VAN (COK {:.2}%):   {:.2}", s.cok_annual * 100.0, s.van);
    println!("  TIR (monthly):      {:.5}%", s.tir * 100.0);
    println!("  TCEA:               {:.5}%", s.tcea * 100.0);
    if !s.irr_converged {
        println!(
            "  (TIR search stopped after {} iterations without converging)",
            s.irr_iterations
        );
    }
    println!("  Verdict vs COK:     {:?}", s.cost_verdict);
    println!();

    println!(
        "{:>5} {:>10} {:>14} {:>12} {:>12} {:>10} {:>10} {:>12} {:>14}",
        "Month",
        "Due",
        "Opening",
        "Interest",
        "Amort",
        "Desgrav",
        "PropIns",
        "Installment",
        "Closing"
    );
    println!("{}", "-".repeat(110));

    for (i, row) in result.schedule.rows.iter().take(preview).enumerate() {
        let due = due_dates
            .and_then(|d| d.get(i))
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "{:>5} {:>10} {:>14.2} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>12.2} {:>14.2}",
            row.month,
            due,
            row.opening_balance,
            row.interest,
            row.amortization,
            row.desgravamen_premium,
            row.property_insurance_premium,
            row.installment,
            row.closing_balance
        );
    }
    if result.schedule.len() > preview {
        println!("... ({} more months)", result.schedule.len() - preview);
    }

    let t = &s.totals;
    println!("\nTotals:");
    println!("  Interest:        {:.2}", t.interest);
    println!("  Amortization:    {:.2}", t.amortization);
    println!("  Insurance:       {:.2}", t.insurance);
    println!("  Fixed charges:   {:.2}", t.fixed_charges);
    println!("  Admin expenses:  {:.2}", t.admin_expenses);
    println!("  Total paid:      {:.2}", t.total_paid);
}
