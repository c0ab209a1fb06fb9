// Integration tests enforcing the `vmca` stdout contract and exit codes.
//
// stdout from --json commands is exactly one JSON value; human output and
// logs go to stderr. Failed runs still print the error envelope.
//
// Run with: cargo test -p vmca-cli --test json_contract_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const AS_OF: &str = "2025-10-01";
const EXTRACT_NAME: &str = "10-01-25_vCD_Inventory.csv";

const REGISTRY: &str = "\
ip_address,hostname,workload_domain,user,vcd_org,host_type
172.31.255.3,esx-a,w381,ops,w381,VCFaaS
172.31.255.4,esx-b,w382,ops,w382,VCFaaS
172.31.255.7,esx-gone,w381,ops,w381,VCFaaS
10.9.9.9,vcs-host,w1,ops,o,VCS
";

const EXTRACT: &str = "#TYPE Selected.VMware.VimAutomation.Cloud.Impl.V1.CIVMImpl
\"IP\",\"vCD\",\"Org\",\"Name\"
\"172.31.255.3\",\"vcd-w381-tok05\",\"w381\",\"esx-a\"
\"172.31.255.4 172.31.255.5\",\"vcd-w382-tok05\",\"w382\",\"esx-b\"
\"172.31.255.9\",\"vcd-cat\",\"public-catalog\",\"catalog\"
";

/// A workspace with a registry export, one site folder and a settings file.
struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hosts.csv"), REGISTRY).unwrap();
        let site = dir.path().join("box/DALST");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::write(site.join(EXTRACT_NAME), EXTRACT).unwrap();
        let fx = Self { dir };
        fx.write_config("");
        fx
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Settings with relative paths; `extra_site_keys` lands in the site table.
    fn write_config(&self, extra_site_keys: &str) {
        let toml = format!(
            "offering = \"VCFaaS\"\n\n[registry]\npath = \"hosts.csv\"\n\n[[inventory.sites]]\nname = \"dalst\"\nfolder = \"box/DALST\"\n{extra_site_keys}"
        );
        std::fs::write(self.config(), toml).unwrap();
    }

    fn config(&self) -> PathBuf {
        self.path("recon.toml")
    }

    fn vmca(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vmca"));
        cmd.current_dir(self.dir.path())
            .env("XDG_CONFIG_HOME", self.path("xdg"))
            .env_remove("VMCA_CONFIG")
            .env_remove("VMCA_LOG");
        cmd
    }

    fn run(&self, extra: &[&str]) -> Output {
        let config = self.config();
        let mut args = vec!["recon", "run", "--config", config.to_str().unwrap(), "--as-of", AS_OF];
        args.extend_from_slice(extra);
        self.vmca().args(&args).output().expect("vmca recon run")
    }
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(stdout: &str) -> serde_json::Value {
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");

    serde_json::from_str(trimmed)
        .unwrap_or_else(|e| panic!("stdout must be valid JSON.\nParse error: {}\nstdout:\n{}", e, trimmed))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ===========================================================================
// vmca recon run
// ===========================================================================

#[test]
fn run_json_success_envelope() {
    let fx = Fixture::new();
    let output = fx.run(&["--json"]);

    assert!(output.status.success(), "exit code: {:?}\nstderr: {}", output.status, stderr(&output));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));

    assert_eq!(val["statusCode"], 200);
    let body = &val["body"];
    assert_eq!(body["status"], "success");
    assert_eq!(body["offering"], "VCFaaS");

    let summary = &body["reconciliation_summary"];
    assert_eq!(summary["total_vmca_hosts"], 3);
    assert_eq!(summary["total_hosts_in_report"], 3);
    assert_eq!(summary["matched_hosts"], 2);
    assert_eq!(summary["missing_in_vmca"], 1);
    assert_eq!(summary["not_deployed"], 1);
    assert_eq!(summary["duplicates"], 0);

    let details = &body["details"];
    assert_eq!(details["matched"].as_array().unwrap().len(), 2);
    assert_eq!(details["missing_in_registry"][0]["ip"], "172.31.255.5");
    assert_eq!(details["missing_in_registry"][0]["match_status"], "missing_in_registry");
    assert_eq!(details["not_deployed"][0]["ip"], "172.31.255.7");
    assert_eq!(details["not_deployed"][0]["match_status"], "not_deployed");

    assert!(stderr(&output).contains("2 matched"));
}

#[test]
fn run_without_json_keeps_stdout_empty() {
    let fx = Fixture::new();
    let output = fx.run(&[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("recon 'VCFaaS'"));
}

#[test]
fn run_output_file() {
    let fx = Fixture::new();
    let out = fx.path("result.json");
    let output = fx.run(&["--output", out.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let written = std::fs::read_to_string(&out).unwrap();
    let val: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(val["statusCode"], 200);
}

#[test]
fn run_other_offering() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "--offering", "VCS"]);
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["body"]["offering"], "VCS");
    assert_eq!(val["body"]["reconciliation_summary"]["total_vmca_hosts"], 1);
    assert_eq!(val["body"]["reconciliation_summary"]["not_deployed"], 1);
}

#[test]
fn fail_on_discrepancy_exits_8() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "--fail-on-discrepancy"]);
    assert_eq!(output.status.code(), Some(8));
    // envelope is still a success
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["statusCode"], 200);
    assert!(stderr(&output).contains("discrepancies found"));
}

#[test]
fn missing_extract_is_404_exit_4() {
    let fx = Fixture::new();
    std::fs::remove_file(fx.path("box/DALST").join(EXTRACT_NAME)).unwrap();

    let output = fx.run(&["--json"]);
    assert_eq!(output.status.code(), Some(4));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["statusCode"], 404);
    assert_eq!(val["body"]["status"], "error");
    assert!(val["body"]["message"].as_str().unwrap().contains("no inventory extract found"));
}

#[test]
fn missing_token_is_401_exit_5() {
    let fx = Fixture::new();
    fx.write_config("token_file = \"secrets/dalst.token\"\n");

    let output = fx.run(&["--json"]);
    assert_eq!(output.status.code(), Some(5));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["statusCode"], 401);
}

#[test]
fn present_token_allows_run() {
    let fx = Fixture::new();
    std::fs::create_dir_all(fx.path("secrets")).unwrap();
    std::fs::write(fx.path("secrets/dalst.token"), "abc123\n").unwrap();
    fx.write_config("token_file = \"secrets/dalst.token\"\n");

    let output = fx.run(&["--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn duplicate_registry_ip_is_500_exit_7() {
    let fx = Fixture::new();
    let mut registry = REGISTRY.to_string();
    registry.push_str("172.31.255.3,esx-a2,w381,ops,w381,VCFaaS\n");
    std::fs::write(fx.path("hosts.csv"), registry).unwrap();

    let output = fx.run(&["--json"]);
    assert_eq!(output.status.code(), Some(7));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["statusCode"], 500);
    assert!(val["body"]["message"].as_str().unwrap().contains("172.31.255.3"));
}

#[test]
fn unreadable_registry_is_500_exit_6() {
    let fx = Fixture::new();
    std::fs::remove_file(fx.path("hosts.csv")).unwrap();

    let output = fx.run(&["--json"]);
    assert_eq!(output.status.code(), Some(6));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["statusCode"], 500);
}

#[test]
fn flags_replace_settings_file() {
    let fx = Fixture::new();
    let registry = fx.path("hosts.csv");
    let site = fx.path("box/DALST");

    let output = fx
        .vmca()
        .args([
            "recon",
            "run",
            "--registry",
            registry.to_str().unwrap(),
            "--inventory-dir",
            site.to_str().unwrap(),
            "--as-of",
            AS_OF,
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["body"]["reconciliation_summary"]["matched_hosts"], 2);
}

#[test]
fn no_settings_and_no_flags_is_config_error() {
    let fx = Fixture::new();
    let output = fx.vmca().args(["recon", "run", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("registry.path is not set"));
}

#[test]
fn unknown_flag_is_usage_error_exit_2() {
    let fx = Fixture::new();
    let output = fx.vmca().args(["recon", "run", "--no-such-flag"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

// ===========================================================================
// vmca recon locate
// ===========================================================================

#[test]
fn locate_json_lists_sites() {
    let fx = Fixture::new();
    let config = fx.config();
    let output = fx
        .vmca()
        .args(["recon", "locate", "--config", config.to_str().unwrap(), "--as-of", AS_OF, "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    let entries = val.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["site"], "dalst");
    assert!(entries[0]["path"].as_str().unwrap().ends_with(EXTRACT_NAME));
}

#[test]
fn locate_falls_back_to_older_extract() {
    let fx = Fixture::new();
    let site = fx.path("box/DALST");
    std::fs::rename(site.join(EXTRACT_NAME), site.join("09-28-25_vCD_Inventory.csv")).unwrap();

    let output = fx
        .vmca()
        .args(["recon", "locate", "--inventory-dir", site.to_str().unwrap(), "--as-of", AS_OF])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("DALST\t"));
    assert!(stdout.trim_end().ends_with("09-28-25_vCD_Inventory.csv"));
}

// ===========================================================================
// vmca config check
// ===========================================================================

fn config_check(fx: &Fixture, config: &Path) -> Output {
    fx.vmca()
        .args(["config", "check", "--config", config.to_str().unwrap()])
        .output()
        .unwrap()
}

#[test]
fn config_check_valid() {
    let fx = Fixture::new();
    let output = config_check(&fx, &fx.config());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("valid: offering 'VCFaaS'"));
}

#[test]
fn config_check_invalid_exits_3() {
    let fx = Fixture::new();
    let bad = fx.path("bad.toml");
    std::fs::write(&bad, "offering = \"\"\n").unwrap();

    let output = config_check(&fx, &bad);
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("offering must not be empty"));
    assert!(err.contains("at least one [[inventory.sites]] entry is required"));
}

#[test]
fn config_check_missing_file_exits_3() {
    let fx = Fixture::new();
    let output = config_check(&fx, &fx.path("nope.toml"));
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("no settings file"));
}
