use argh::FromArgs;
use std::path::PathBuf;

use epireg_ants::{
    apply_transforms::{AntsApplyTransforms, TransformRef},
    epi_to_anat_invocation,
    motion_corr::AntsMotionCorr,
    EpiToAnatInputs,
};
use epireg_cli::{execute, print_plan, RunOptions};

/// EPI preprocessing steps driven by the ANTs command line tools
#[derive(FromArgs)]
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Register(RegisterArgs),
    MotionCorr(MotionCorrArgs),
    ApplyTransforms(ApplyTransformsArgs),
}

/// register an EPI onto an anatomical image
#[derive(FromArgs)]
#[argh(subcommand, name = "register")]
struct RegisterArgs {
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

    /// directory containing the ANTs binaries
    #[argh(option)]
    ants_path: Option<PathBuf>,

    /// working directory where the outputs are written
    #[argh(option)]
    workdir: Option<PathBuf>,
}

/// realign a 4D EPI time series onto a reference volume
#[derive(FromArgs)]
#[argh(subcommand, name = "motion-corr")]
struct MotionCorrArgs {
    /// reference volume
    #[argh(positional)]
    reference: String,

    /// 4D time series
    #[argh(positional)]
    input: String,

    /// directory receiving the outputs
    #[argh(option, default = "String::from(\"ants_mc_tmp\")")]
    output_dir: String,

    /// move the outputs of a previous pass to first_<output-dir> before running
    #[argh(switch)]
    second_pass: bool,

    /// print the command line without running it
    #[argh(switch)]
    dry_run: bool,

    /// print the command as JSON; requires --dry-run
    #[argh(switch)]
    json: bool,

    /// directory containing the ANTs binaries
    #[argh(option)]
    ants_path: Option<PathBuf>,

    /// working directory where the outputs are written
    #[argh(option)]
    workdir: Option<PathBuf>,
}

/// resample a volume through a chain of transforms
#[derive(FromArgs)]
#[argh(subcommand, name = "apply-transforms")]
struct ApplyTransformsArgs {
    /// volume to resample
    #[argh(option, short = 'i')]
    input: String,

    /// image defining the output space
    #[argh(option, short = 'r')]
    reference: String,

    /// output file
    #[argh(option, short = 'o')]
    output: String,

    /// transform file, or [file,1] to apply it inverted; repeatable, in command line order
    #[argh(option, short = 't')]
    transform: Vec<TransformRef>,

    /// motion parameters CSV written by motion-corr
    #[argh(option)]
    motion_params: Option<String>,

    /// volume index used with --motion-params
    #[argh(option, default = "0")]
    volume: usize,

    /// print the command lines without running them
    #[argh(switch)]
    dry_run: bool,

    /// print the commands as JSON; requires --dry-run
    #[argh(switch)]
    json: bool,

    /// directory containing the ANTs binaries
    #[argh(option)]
    ants_path: Option<PathBuf>,

    /// working directory where the outputs are written
    #[argh(option)]
    workdir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Register(args) => {
            let inputs = EpiToAnatInputs::new(args.epi, args.anat, args.mask)?;
            let inv = epi_to_anat_invocation(&inputs)?;
            let opts = RunOptions::new(args.dry_run, args.json, args.ants_path, args.workdir)?;
            let code = execute(&inv, &opts)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Command::MotionCorr(args) => {
            let mc = AntsMotionCorr::new(args.reference, args.input)?
                .with_output_dir(args.output_dir)?;
            let opts = RunOptions::new(args.dry_run, args.json, args.ants_path, args.workdir)?;
            if opts.dry_run {
                print_plan(&[mc.to_invocation()], opts.json)?;
                return Ok(());
            }
            let outputs = mc.run(&opts.tool_config(), args.second_pass)?;
            log::info!("Corrected time series: {}", outputs.corrected.display());
            log::info!("Average image: {}", outputs.average.display());
            log::info!("Motion parameters: {}", outputs.params_csv.display());
        }
        Command::ApplyTransforms(args) => {
            let mut apply =
                AntsApplyTransforms::new(args.input, args.reference, args.output, args.transform)?;
            if let Some(params) = args.motion_params {
                apply = apply.with_motion(params, args.volume);
            }
            let opts = RunOptions::new(args.dry_run, args.json, args.ants_path, args.workdir)?;
            if opts.dry_run {
                print_plan(&apply.plan()?, opts.json)?;
                return Ok(());
            }
            apply.run(&opts.tool_config())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use argh::FromArgs;

    #[test]
    fn register_missing_argument_is_usage_error() {
        assert!(Args::from_args(&["epireg"], &["register", "epi.nii.gz", "anat.nii.gz"]).is_err());
    }

    #[test]
    fn register_parses_arguments_in_order() {
        let args = Args::from_args(
            &["epireg"],
            &["register", "epi.nii.gz", "anat.nii.gz", "mask.nii.gz", "--dry-run"],
        )
        .unwrap();
        match args.command {
            Command::Register(args) => {
                assert_eq!(args.epi, "epi.nii.gz");
                assert_eq!(args.anat, "anat.nii.gz");
                assert_eq!(args.mask, "mask.nii.gz");
                assert!(args.dry_run);
            }
            _ => panic!("expected the register subcommand"),
        }
    }

    #[test]
    fn apply_transforms_keeps_transform_order() {
        let args = Args::from_args(
            &["epireg"],
            &[
                "apply-transforms",
                "-i",
                "in.nii.gz",
                "-r",
                "ref.nii.gz",
                "-o",
                "out.nii.gz",
                "-t",
                "[affine.mat,1]",
                "-t",
                "warp.nii.gz",
            ],
        )
        .unwrap();
        match args.command {
            Command::ApplyTransforms(args) => {
                let rendered = args
                    .transform
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>();
                assert_eq!(rendered, vec!["[affine.mat,1]", "warp.nii.gz"]);
            }
            _ => panic!("expected the apply-transforms subcommand"),
        }
    }
}
