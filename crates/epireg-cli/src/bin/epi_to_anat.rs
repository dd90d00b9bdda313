use argh::FromArgs;
use std::path::PathBuf;

use epireg_ants::{epi_to_anat_invocation, EpiToAnatInputs};
use epireg_cli::{execute, RunOptions};

/// Registers an EPI onto an anatomical image with antsRegistration
#[derive(FromArgs)]
struct Args {
    /// EPI image (moving)
    #[argh(positional)]
    epi: String,

    /// anatomical image (fixed)
    #[argh(positional)]
    anat: String,

    /// brain mask
    #[argh(positional)]
    mask: String,

    /// print the command line without running it
    #[argh(switch)]
    dry_run: bool,

    /// print the command as JSON; requires --dry-run
    #[argh(switch)]
    json: bool,

    /// directory containing the ANTs binaries (defaults to $ANTSPATH, then PATH)
    #[argh(option)]
    ants_path: Option<PathBuf>,

    /// working directory where the outputs are written
    #[argh(option)]
    workdir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let inputs = EpiToAnatInputs::new(args.epi, args.anat, args.mask)?;
    let inv = epi_to_anat_invocation(&inputs)?;

    let opts = RunOptions::new(args.dry_run, args.json, args.ants_path, args.workdir)?;
    let code = execute(&inv, &opts)?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use argh::FromArgs;

    #[test]
    fn missing_argument_is_usage_error() {
        assert!(Args::from_args(&["epi-to-anat"], &["epi.nii.gz", "anat.nii.gz"]).is_err());
        assert!(Args::from_args(&["epi-to-anat"], &[]).is_err());
    }

    #[test]
    fn parses_arguments_in_order() {
        let args = Args::from_args(
            &["epi-to-anat"],
            &["epi.nii.gz", "anat.nii.gz", "mask.nii.gz"],
        )
        .unwrap();
        assert_eq!(args.epi, "epi.nii.gz");
        assert_eq!(args.anat, "anat.nii.gz");
        assert_eq!(args.mask, "mask.nii.gz");
        assert!(!args.dry_run);
        assert!(args.ants_path.is_none());
    }
}
