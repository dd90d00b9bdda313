#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use epireg_ants::{
    epi_to_anat_invocation,
    motion_corr::AntsMotionCorr,
    runner::{exit_code, run},
    EpiToAnatInputs, ToolConfig,
};

fn write_tool(bin_dir: &Path, name: &str, script: &str) -> std::io::Result<()> {
    let path = bin_dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{script}\n"))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
}

// NOTE: one test per binary so no other thread forks while a script is open for writing
#[test]
fn runs_fake_ants_tools() -> Result<(), Box<dyn std::error::Error>> {
    let bin_dir = tempfile::tempdir()?;
    let work_dir = tempfile::tempdir()?;
    let config = ToolConfig::new(
        Some(bin_dir.path().to_path_buf()),
        Some(work_dir.path().to_path_buf()),
    );

    // the registration forwards the tool's exit code and runs in the work dir
    write_tool(
        bin_dir.path(),
        "antsRegistration",
        r#"printf '%s\n' "$@" > args.txt; touch output_warped_image.nii.gz; exit 7"#,
    )?;
    let inputs = EpiToAnatInputs::new("epi.nii.gz", "anat.nii.gz", "mask.nii.gz")?;
    let inv = epi_to_anat_invocation(&inputs)?;
    let status = run(&inv, &config)?;
    assert_eq!(exit_code(status), 7);
    assert!(work_dir.path().join("output_warped_image.nii.gz").exists());

    let recorded = std::fs::read_to_string(work_dir.path().join("args.txt"))?;
    assert_eq!(recorded.lines().collect::<Vec<_>>(), inv.args);

    // the second motion correction pass keeps the first pass outputs
    write_tool(
        bin_dir.path(),
        "antsMotionCorr",
        "touch ants_mc_tmp/motcorr.nii.gz",
    )?;
    let mc = AntsMotionCorr::new("median.nii.gz", "bold.nii.gz")?;
    let first = mc.run(&config, false)?;
    assert!(work_dir.path().join(&first.corrected).exists());

    mc.run(&config, true)?;
    assert!(work_dir
        .path()
        .join("first_ants_mc_tmp/motcorr.nii.gz")
        .exists());
    assert!(work_dir.path().join("ants_mc_tmp/motcorr.nii.gz").exists());

    // repeating the second pass replaces the stale first pass directory
    std::fs::write(work_dir.path().join("ants_mc_tmp/marker"), "second")?;
    mc.run(&config, true)?;
    let moved = std::fs::read_to_string(work_dir.path().join("first_ants_mc_tmp/marker"))?;
    assert_eq!(moved, "second");
    assert!(!work_dir
        .path()
        .join("first_ants_mc_tmp/ants_mc_tmp")
        .exists());

    // a failing motion correction is an error
    write_tool(bin_dir.path(), "antsMotionCorr", "exit 1")?;
    assert!(mc.run(&config, false).is_err());

    Ok(())
}
