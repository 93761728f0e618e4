use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "pocket";

fn pocket(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("POCKET_LEDGER_DATA_DIR", data_dir.path());
    cmd.env_remove("POCKET_LOG");
    cmd
}

fn seed_march(data_dir: &TempDir) {
    pocket(data_dir)
        .args(["add", "income", "2500", "-c", "Salary", "--date", "2024-03-01"])
        .assert()
        .success();
    pocket(data_dir)
        .args([
            "add", "expense", "12.50", "-c", "food", "-d", "Lunch", "--date", "2024-03-02",
        ])
        .assert()
        .success();
    pocket(data_dir)
        .args(["budget", "set", "Food", "300"])
        .assert()
        .success();
}

#[test]
fn add_prints_confirmation() {
    let data_dir = TempDir::new().unwrap();

    pocket(&data_dir)
        .args([
            "add", "expense", "12.50", "-c", "Food", "-d", "Lunch", "--date", "2024-03-02",
        ])
        .assert()
        .success()
        .stdout(contains("Recorded expense of $12.50 in 'Food' on 2024-03-02 (Lunch)"));

    let stored =
        std::fs::read_to_string(data_dir.path().join("database").join("transactions.csv")).unwrap();
    assert_eq!(
        stored,
        "date,type,category,description,amount_minor\n2024-03-02,expense,Food,Lunch,1250\n"
    );
}

#[test]
fn add_rejects_unknown_category() {
    let data_dir = TempDir::new().unwrap();

    pocket(&data_dir)
        .args(["add", "expense", "5", "-c", "Yachts"])
        .assert()
        .failure()
        .stderr(contains("Yachts"));

    assert!(!data_dir
        .path()
        .join("database")
        .join("transactions.csv")
        .exists());
}

#[test]
fn add_rejects_non_positive_amount() {
    let data_dir = TempDir::new().unwrap();

    pocket(&data_dir)
        .args(["add", "expense", "0", "-c", "Food"])
        .assert()
        .failure()
        .stderr(contains("greater than zero"));
}

#[test]
fn balance_reports_month_totals() {
    let data_dir = TempDir::new().unwrap();
    seed_march(&data_dir);

    pocket(&data_dir)
        .args(["balance", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(
            contains("$2,500.00")
                .and(contains("$12.50"))
                .and(contains("$2,487.50")),
        );
}

#[test]
fn list_month_shows_table() {
    let data_dir = TempDir::new().unwrap();
    seed_march(&data_dir);

    pocket(&data_dir)
        .args(["list", "--filter", "month", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Lunch").and(contains("Salary")));

    pocket(&data_dir)
        .args(["list", "--filter", "month", "--month", "2024-04"])
        .assert()
        .success()
        .stdout(contains("No transactions match the filter."));
}

#[test]
fn health_score_for_a_healthy_month() {
    let data_dir = TempDir::new().unwrap();
    seed_march(&data_dir);

    pocket(&data_dir)
        .args(["analyze", "health", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Score: 100 / 100 (Good)"));
}

#[test]
fn recommend_without_budgets_suggests_setting_them() {
    let data_dir = TempDir::new().unwrap();

    pocket(&data_dir)
        .args(["assistant", "recommend", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Set Budgets").and(contains("No immediate alerts.")));
}

#[test]
fn bad_month_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    pocket(&data_dir)
        .args(["balance", "--month", "2024-13"])
        .assert()
        .failure();
}

#[test]
fn export_with_empty_ledger_reports_nothing() {
    let data_dir = TempDir::new().unwrap();

    pocket(&data_dir)
        .args(["data", "export-csv"])
        .assert()
        .success()
        .stdout(contains("No transactions to export."));
}

#[test]
fn import_needs_confirmation() {
    let data_dir = TempDir::new().unwrap();
    let source = data_dir.path().join("incoming.csv");
    std::fs::write(
        &source,
        "date,type,category,description,amount_minor\n2024-03-05,expense,Food,Dinner,3000\n",
    )
    .unwrap();

    pocket(&data_dir)
        .args(["data", "import"])
        .arg(&source)
        .assert()
        .success()
        .stdout(contains("Re-run with --yes"));

    pocket(&data_dir)
        .args(["data", "import", "--yes"])
        .arg(&source)
        .assert()
        .success()
        .stdout(contains("Imported:    1"));

    pocket(&data_dir)
        .args(["data", "import", "--yes"])
        .arg(&source)
        .assert()
        .success()
        .stdout(contains("No new transactions to import."));
}

#[test]
fn backup_writes_archive() {
    let data_dir = TempDir::new().unwrap();
    seed_march(&data_dir);

    pocket(&data_dir)
        .args(["data", "backup"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let archives = std::fs::read_dir(data_dir.path().join("backups"))
        .unwrap()
        .count();
    assert_eq!(archives, 1);
}

#[test]
fn history_lists_recorded_changes() {
    let data_dir = TempDir::new().unwrap();
    seed_march(&data_dir);

    pocket(&data_dir)
        .args(["history", "--count", "5"])
        .assert()
        .success()
        .stdout(contains("CREATE").and(contains("Food")));
}

#[test]
fn savings_trend_bounds_month_count() {
    let data_dir = TempDir::new().unwrap();

    for months in ["0", "121", "4000000000"] {
        pocket(&data_dir)
            .args(["analyze", "savings", "--months", months])
            .assert()
            .failure()
            .stderr(contains("--months"));
    }

    pocket(&data_dir)
        .args(["analyze", "savings", "--month", "2024-03", "--months", "120"])
        .assert()
        .success();
}
