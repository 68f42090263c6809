//! Non-interactive command-line front-end: seeds demo data, prints a
//! month's totals, and exports the rendered SVG.

use std::{env, fs, path::PathBuf};

use colored::Colorize;

use crate::config::{ConfigManager, Theme};
use crate::currency::format_amount;
use crate::domain::{
    ExpenseCategory, ExpenseItem, IncomeItem, IncomeKind, MonthKey, Workbook,
};
use crate::editor::Editor;
use crate::errors::CashflowError;
use crate::layout::ColumnGroup;
use crate::render::render_svg;
use crate::storage::JsonStorage;

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 500.0;
const DEFAULT_OUT: &str = "cashflow.svg";

struct CliOptions {
    data_dir: Option<PathBuf>,
    month: Option<MonthKey>,
    out: Option<PathBuf>,
    width: f64,
    height: f64,
    light: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            data_dir: None,
            month: None,
            out: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            light: false,
        }
    }
}

pub fn run_cli() -> Result<(), CashflowError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

pub fn run_with_args(args: &[String]) -> Result<(), CashflowError> {
    let Some((command, rest)) = args.split_first() else {
        print_help();
        return Ok(());
    };
    match command.as_str() {
        "demo" => cmd_demo(&parse_options(rest)?),
        "summary" => cmd_summary(&parse_options(rest)?),
        "render" => cmd_render(&parse_options(rest)?),
        "version" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => Err(CashflowError::InvalidRef(format!(
            "unknown command `{other}`, try `help`"
        ))),
    }
}

fn parse_options(rest: &[String]) -> Result<CliOptions, CashflowError> {
    let mut opts = CliOptions::default();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data-dir" => opts.data_dir = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--month" => {
                opts.month = Some(
                    value(&mut iter, arg)?
                        .parse()
                        .map_err(CashflowError::InvalidRef)?,
                )
            }
            "--out" => opts.out = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--width" => opts.width = numeric(value(&mut iter, arg)?, arg)?,
            "--height" => opts.height = numeric(value(&mut iter, arg)?, arg)?,
            "--light" => opts.light = true,
            other => {
                return Err(CashflowError::InvalidRef(format!(
                    "unknown option `{other}`"
                )))
            }
        }
    }
    Ok(opts)
}

fn value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a str, CashflowError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| CashflowError::InvalidRef(format!("missing value for `{flag}`")))
}

fn numeric(raw: &str, flag: &str) -> Result<f64, CashflowError> {
    raw.parse()
        .map_err(|_| CashflowError::InvalidRef(format!("invalid number for `{flag}`: {raw}")))
}

fn open_storage(opts: &CliOptions) -> Result<JsonStorage, CashflowError> {
    JsonStorage::new(opts.data_dir.clone())
}

fn open_config(opts: &CliOptions) -> Result<ConfigManager, CashflowError> {
    match &opts.data_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone()),
        None => ConfigManager::new(),
    }
}

fn remember_month(opts: &CliOptions, month: MonthKey) -> Result<(), CashflowError> {
    let manager = open_config(opts)?;
    let mut config = manager.load()?;
    config.last_opened_month = Some(month);
    manager.save(&config)
}

fn pick_month(opts: &CliOptions, workbook: &Workbook) -> MonthKey {
    opts.month
        .or_else(|| workbook.latest_month())
        .unwrap_or_else(MonthKey::current)
}

/// Seeds the workbook with a sample month so the other commands have
/// something to show on a fresh install.
fn cmd_demo(opts: &CliOptions) -> Result<(), CashflowError> {
    let storage = open_storage(opts)?;
    let month = opts.month.unwrap_or_else(MonthKey::current);
    let mut workbook = Workbook::seeded(month);
    let plan = workbook.ensure_month(month);
    plan.income = vec![
        IncomeItem::new("Salary", 5300.0, IncomeKind::Active),
        IncomeItem::new("Dividends", 262.0, IncomeKind::Passive),
    ];
    plan.expenses = vec![
        ExpenseItem::new("Income Tax", 494.0, ExpenseCategory::Payroll),
        ExpenseItem::new("Rent", 850.0, ExpenseCategory::Living),
        ExpenseItem::new("Groceries", 933.0, ExpenseCategory::Living),
        ExpenseItem::new("Index Funds", 400.0, ExpenseCategory::LongTerm),
        ExpenseItem::new("Dining Out", 250.0, ExpenseCategory::Flexible),
    ];
    workbook.touch();
    storage.save_workbook(&workbook)?;
    println!(
        "Demo workbook for {} written to {}",
        month.label().bold(),
        storage.workbook_path().display()
    );
    Ok(())
}

fn cmd_summary(opts: &CliOptions) -> Result<(), CashflowError> {
    let storage = open_storage(opts)?;
    let workbook = storage.load_workbook()?;
    let month = pick_month(opts, &workbook);
    let editor = Editor::new(workbook, month);
    let scene = editor.layout(opts.width, opts.height);
    let summary = scene.summary;

    println!("{}", month.label().bold());
    println!("  Income    {}", format_amount(summary.total_income).green());
    println!(
        "  Expenses  {}",
        format_amount(summary.total_expenses).red()
    );
    if summary.surplus >= 0.0 {
        println!("  Surplus   {}", format_amount(summary.surplus).green());
    } else {
        println!("  Deficit   {}", format_amount(-summary.surplus).red());
    }
    let categories: Vec<_> = scene
        .nodes
        .iter()
        .filter(|n| n.group == ColumnGroup::Category)
        .collect();
    if !categories.is_empty() {
        println!();
        for node in categories {
            println!("  {:<10} {}", node.label, format_amount(node.value));
        }
    }
    remember_month(opts, month)
}

fn cmd_render(opts: &CliOptions) -> Result<(), CashflowError> {
    let storage = open_storage(opts)?;
    let workbook = storage.load_workbook()?;
    let month = pick_month(opts, &workbook);
    let editor = Editor::new(workbook, month);
    let scene = editor.layout(opts.width, opts.height);
    let theme = if opts.light {
        Theme::Light
    } else {
        open_config(opts)?.load()?.theme
    };
    let svg = render_svg(&scene, opts.width, opts.height, theme);
    let out = opts
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));
    fs::write(&out, svg)?;
    println!("Rendered {} to {}", month.label().bold(), out.display());
    remember_month(opts, month)
}

fn cmd_version() {
    println!(
        "cashflow_core {} ({} {}, built {} for {} [{}])",
        env!("CARGO_PKG_VERSION"),
        env!("CASHFLOW_CORE_BUILD_HASH"),
        env!("CASHFLOW_CORE_BUILD_STATUS"),
        env!("CASHFLOW_CORE_BUILD_TIMESTAMP"),
        env!("CASHFLOW_CORE_BUILD_TARGET"),
        env!("CASHFLOW_CORE_BUILD_PROFILE"),
    );
}

fn print_help() {
    println!("cashflow_core_cli - monthly cash-flow Sankey tool");
    println!();
    println!("USAGE:");
    println!("  cashflow_core_cli <command> [options]");
    println!();
    println!("COMMANDS:");
    println!("  demo       seed the workbook with a sample month");
    println!("  summary    print income/expense/surplus totals for a month");
    println!("  render     export the month's Sankey diagram as SVG");
    println!("  version    print version and build metadata");
    println!("  help       show this message");
    println!();
    println!("OPTIONS:");
    println!("  --data-dir <path>   workbook directory (default ~/.cashflow_core)");
    println!("  --month <YYYY-MM>   month to operate on (default: latest)");
    println!("  --out <file>        output file for `render` (default cashflow.svg)");
    println!("  --width <px>        canvas width (default 800)");
    println!("  --height <px>       canvas height (default 500)");
    println!("  --light             render with the light theme");
}
