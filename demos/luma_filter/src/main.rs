use argh::FromArgs;
use std::path::PathBuf;

use lumafilter::image::{PlaneSize, VideoFormat};
use lumafilter::imgproc::padding::PaddingMode;
use lumafilter::video::raw::{RawVideoReader, RawVideoWriter};
use lumafilter::video::{
    BilateralFilter, BilateralParams, BlurFilter, BlurParams, NavigationEvent, VideoFilter,
};

#[derive(FromArgs)]
/// Filter the luma plane of a raw I420 video file
struct Args {
    /// path to the input raw video
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output raw video
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// frame width in pixels
    #[argh(option)]
    width: usize,

    /// frame height in pixels
    #[argh(option)]
    height: usize,

    /// the filter to apply: blur or bilateral
    #[argh(option, short = 'f', default = "String::from(\"blur\")")]
    filter: String,

    /// path to a JSON file with the filter parameters
    #[argh(option, short = 'p')]
    params: Option<PathBuf>,

    /// keys released before the first frame, e.g. "++-"
    #[argh(option, short = 'k', default = "String::new()")]
    keys: String,

    /// border mode: zero, replicate or reflect101
    #[argh(option, default = "PaddingMode::Zero")]
    padding: PaddingMode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let preset = args.params.map(std::fs::read_to_string).transpose()?;

    let filter: Box<dyn VideoFilter> = match args.filter.as_str() {
        "blur" => {
            let params = match preset {
                Some(json) => BlurParams::from_json(&json)?,
                None => BlurParams::default(),
            };
            Box::new(BlurFilter::with_params(params)?.with_padding(args.padding))
        }
        "bilateral" => {
            let params = match preset {
                Some(json) => BilateralParams::from_json(&json)?,
                None => BilateralParams::default(),
            };
            Box::new(BilateralFilter::with_params(params)?.with_padding(args.padding))
        }
        other => return Err(format!("unknown filter: {other}").into()),
    };

    for key in args.keys.chars() {
        filter.src_event(&NavigationEvent::key_release(&key.to_string()))?;
    }

    for spec in filter.properties() {
        log::info!("{} = {}", spec.name, filter.property(spec.name)?);
    }

    let size = PlaneSize {
        width: args.width,
        height: args.height,
    };
    let reader = RawVideoReader::open(&args.input, VideoFormat::I420, size)?;
    let mut writer = RawVideoWriter::create(&args.output)?;

    for frame in reader {
        let out = filter.transform(&frame?)?;
        writer.write_frame(&out)?;
    }
    writer.flush()?;

    log::info!(
        "{} frames filtered with {}",
        writer.frames_written(),
        filter.metadata().long_name
    );

    Ok(())
}
