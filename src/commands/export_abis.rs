use std::path::Path;

use anyhow::Result;

use provisioner::application::AbiExportUseCase;
use provisioner::infrastructure::JsonArtifactRepository;

pub fn cmd_export_abis(config_path: Option<&Path>, out: Option<&Path>, json: bool) -> Result<()> {
    let config = super::load_config(config_path, None)?;
    let dest = match out {
        Some(path) => path.to_path_buf(),
        None => config.abis_dir(),
    };

    let use_case = AbiExportUseCase::new(JsonArtifactRepository::new(config.artifacts_dir()));
    let report = use_case.run(&config.plan()?, &dest)?;

    if json {
        let published: Vec<_> = report.published.iter().map(|(unit, _)| unit).collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "export",
                "command": "export-abis",
                "path": dest.display().to_string(),
                "published": published,
                "missing": report.missing,
            })
        );
        return Ok(());
    }

    for unit in &report.missing {
        eprintln!("warning: no build artifact for {unit}, skipped");
    }
    println!(
        "Copied {} artifact(s) to {}",
        report.published_count(),
        dest.display()
    );
    Ok(())
}
