use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use dotmatrix_common::{shade_to_color, Buttons};
use dotmatrix_gb::{GameBoy, GameBoyConfig, RtcMode, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: dmg_frame_dump <rom_path> <out.ppm> [frames] [--frozen-rtc] [--hold=start,a,..]";

struct Args {
    rom_path: PathBuf,
    out_path: PathBuf,
    frames: u32,
    rtc_mode: RtcMode,
    held: Buttons,
}

fn parse_buttons(list: &str) -> Result<Buttons> {
    list.split(',')
        .filter(|name| !name.is_empty())
        .try_fold(Buttons::empty(), |held, name| {
            Buttons::by_name(name)
                .map(|button| held | button)
                .ok_or_else(|| anyhow!("unknown button '{name}'"))
        })
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut rtc_mode = RtcMode::Emulated;
    let mut held = Buttons::empty();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--frozen-rtc" => rtc_mode = RtcMode::Frozen,
            flag if flag.starts_with("--hold=") => held = parse_buttons(&flag["--hold=".len()..])?,
            flag if flag.starts_with("--") => bail!("unknown flag '{flag}'\n{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let rom_path = positional.next().map(PathBuf::from).ok_or_else(|| anyhow!(USAGE))?;
    let out_path = positional.next().map(PathBuf::from).ok_or_else(|| anyhow!(USAGE))?;
    let frames = match positional.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("invalid frame count '{frames}'"))?,
        None => 120,
    };

    Ok(Args {
        rom_path,
        out_path,
        frames,
        rtc_mode,
        held,
    })
}

/// Binary PPM (P6) of the frame buffer through the DMG palette.
fn write_ppm(out: &mut impl Write, frame: &[u8]) -> std::io::Result<()> {
    write!(out, "P6\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n")?;
    let mut rgb = Vec::with_capacity(frame.len() * 3);
    for &shade in frame {
        let (r, g, b) = shade_to_color(shade).rgb();
        rgb.extend_from_slice(&[r, g, b]);
    }
    out.write_all(&rgb)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let rom = std::fs::read(&args.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", args.rom_path.display()))?;

    let config = GameBoyConfig::builder().rtc_mode(args.rtc_mode).build();
    let mut gb = GameBoy::with_config(&rom, config)
        .with_context(|| format!("failed to load '{}'", args.rom_path.display()))?;

    gb.set_buttons(args.held);
    let mut cycles: u64 = 0;
    for _ in 0..args.frames {
        cycles += gb.step_frame() as u64;
        gb.clear_frame_ready();
    }

    let file = std::fs::File::create(&args.out_path)
        .with_context(|| format!("failed to create '{}'", args.out_path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    write_ppm(&mut out, gb.frame_buffer())
        .and_then(|()| out.flush())
        .with_context(|| format!("failed to write '{}'", args.out_path.display()))?;

    log::info!("ran {} frames ({cycles} cycles)", args.frames);
    if let Some(rtc) = gb.bus().cartridge.rtc() {
        log::info!("cartridge clock {:?}", rtc.live());
    }
    println!(
        "Wrote {}x{} PPM after {} frames to '{}'",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        args.frames,
        args.out_path.display()
    );
    Ok(())
}
