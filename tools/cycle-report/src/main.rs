//! Cycle report for ws2811-pulse
//!
//! Runs every emitter on the simulator and tabulates the pulse widths, bit
//! periods, channel skew and interrupt-masked time it measures. Run it after
//! touching a schedule to see the effect at a glance.
//!
//! Usage:
//!   cd tools/cycle-report
//!   cargo run --release
//!   cat report.md

use std::fs::File;
use std::io::Write;
use ws2811_pulse::sim::{Pulse, SimPort, Simulator};
use ws2811_pulse::timing::{PhaseBudget, cost};
use ws2811_pulse::{
    BIT, Frame, LATCH_US, LONG, Pin, Pixel, SHORT, SharedPins, WS2811, emit_dual, emit_quad,
    emit_single, emit_triple,
};

type Sim = Simulator<4096>;

const PORT: SimPort = SimPort(0);
const OTHER: SimPort = SimPort(1);

// ============================================================================
// Measurement
// ============================================================================

struct Measurement {
    name: &'static str,
    zero_high: (u64, u64),
    one_high: (u64, u64),
    period: (u64, u64),
    skew: u64,
    total: u64,
    masked: u64,
}

fn span(values: impl Iterator<Item = u64>) -> (u64, u64) {
    values.fold((u64::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn measure(name: &'static str, sim: &Sim, channels: &[(SimPort, u8)]) -> Measurement {
    let pulses: Vec<Vec<Pulse>> = channels
        .iter()
        .map(|&(port, bit)| sim.pulses(port, bit).to_vec())
        .collect();
    let threshold = WS2811.threshold_cycles() as u64;
    let all = || pulses.iter().flatten();

    let skew = (0..pulses[0].len())
        .map(|i| {
            let (lo, hi) = span(pulses.iter().map(|p| p[i].rise));
            hi - lo
        })
        .max()
        .unwrap_or(0);

    let (masked_at, restored_at) = sim.mask_window().unwrap_or((0, 0));

    Measurement {
        name,
        zero_high: span(all().map(Pulse::high).filter(|&h| h <= threshold)),
        one_high: span(all().map(Pulse::high).filter(|&h| h > threshold)),
        period: span(
            pulses
                .iter()
                .flat_map(|p| p.windows(2).map(|w| w[1].rise - w[0].rise)),
        ),
        skew,
        total: sim.cycles(),
        masked: restored_at - masked_at,
    }
}

fn sample_pixels() -> [Pixel; 4] {
    [
        Pixel::new(0xFF, 0x00, 0xA5),
        Pixel::new(0x01, 0x80, 0x7E),
        Pixel::new(0x3C, 0xC3, 0x00),
        Pixel::new(0xFF, 0xFF, 0xFF),
    ]
}

fn run_all() -> Vec<Measurement> {
    let pixels = sample_pixels();
    let mut reversed = pixels;
    reversed.reverse();

    let mut results = Vec::new();

    let mut sim = Sim::new();
    emit_single(&mut sim, Pin::new(PORT, 0), &Frame::single(&pixels).unwrap());
    results.push(measure("single", &sim, &[(PORT, 0)]));

    let mut sim = Sim::new();
    emit_dual(
        &mut sim,
        [Pin::new(PORT, 0), Pin::new(OTHER, 0)],
        &Frame::new([&pixels[..], &reversed[..]]).unwrap(),
    );
    results.push(measure("dual", &sim, &[(PORT, 0), (OTHER, 0)]));

    let mut sim = Sim::new();
    emit_triple(
        &mut sim,
        SharedPins::new(PORT, [0, 1, 2]),
        &Frame::new([&pixels[..], &reversed[..], &pixels[..]]).unwrap(),
    );
    results.push(measure("triple", &sim, &[(PORT, 0), (PORT, 1), (PORT, 2)]));

    let mut sim = Sim::new();
    emit_quad(
        &mut sim,
        SharedPins::new(PORT, [0, 1, 2, 3]),
        &Frame::new([&pixels[..], &reversed[..], &pixels[..], &reversed[..]]).unwrap(),
    );
    results.push(measure(
        "quad",
        &sim,
        &[(PORT, 0), (PORT, 1), (PORT, 2), (PORT, 3)],
    ));

    results
}

// ============================================================================
// Report
// ============================================================================

fn write_header(f: &mut File) -> std::io::Result<()> {
    writeln!(f, "# WS2811 Pulse Cycle Report")?;
    writeln!(f)?;
    writeln!(
        f,
        "**Generated:** {}  ",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(f, "**Core clock:** {} MHz", WS2811.clock_hz / 1_000_000)?;
    writeln!(f)?;
    Ok(())
}

fn write_bit_timing(f: &mut File) -> std::io::Result<()> {
    writeln!(f, "## Bit Timing")?;
    writeln!(f)?;
    writeln!(f, "| Phase | Cycles | Time |")?;
    writeln!(f, "|-------|--------|------|")?;
    for (name, cycles) in [("short", SHORT), ("long", LONG), ("bit", BIT)] {
        writeln!(
            f,
            "| {} | {} | {} ns |",
            name,
            cycles,
            WS2811.ns_for_cycles(cycles as u64)
        )?;
    }
    writeln!(f, "| latch | n/a | {} us |", LATCH_US)?;
    writeln!(f)?;
    Ok(())
}

fn write_budgets(f: &mut File) -> std::io::Result<()> {
    writeln!(f, "## Work Budget per Bit")?;
    writeln!(f)?;
    writeln!(
        f,
        "Cycles left for bookkeeping after the register writes of each transition."
    )?;
    writeln!(f)?;
    writeln!(f, "| Writes per transition | Short | Middle | Tail | Total |")?;
    writeln!(f, "|-----------------------|-------|--------|------|-------|")?;
    for writes in 1..=2 {
        let budget = PhaseBudget::for_writes(writes);
        writeln!(
            f,
            "| {} | {} | {} | {} | {} |",
            writes,
            budget.short,
            budget.middle,
            budget.tail,
            budget.total()
        )?;
    }
    writeln!(f)?;
    writeln!(
        f,
        "A byte fetch costs {} cycles and a bit copy {}.",
        cost::LD,
        cost::BIT_COPY
    )?;
    writeln!(f)?;
    Ok(())
}

fn write_measurements(f: &mut File, results: &[Measurement]) -> std::io::Result<()> {
    writeln!(f, "## Simulated Emitters")?;
    writeln!(f)?;
    writeln!(
        f,
        "{} pixels per channel. Ranges are min-max over every bit of every channel.",
        sample_pixels().len()
    )?;
    writeln!(f)?;
    writeln!(
        f,
        "| Emitter | Zero high | One high | Period | Skew | Total | Masked |"
    )?;
    writeln!(
        f,
        "|---------|-----------|----------|--------|------|-------|--------|"
    )?;
    for m in results {
        writeln!(
            f,
            "| {} | {}-{} | {}-{} | {}-{} | {} | {} | {} us |",
            m.name,
            m.zero_high.0,
            m.zero_high.1,
            m.one_high.0,
            m.one_high.1,
            m.period.0,
            m.period.1,
            m.skew,
            m.total,
            WS2811.ns_for_cycles(m.masked) / 1000
        )?;
    }
    writeln!(f)?;
    Ok(())
}

fn main() -> std::io::Result<()> {
    let report_path = "report.md";

    // Remove old report if it exists
    let _ = std::fs::remove_file(report_path);

    let mut file = File::create(report_path)?;

    println!("Generating cycle report...");

    write_header(&mut file)?;
    write_bit_timing(&mut file)?;
    write_budgets(&mut file)?;

    let results = run_all();
    write_measurements(&mut file, &results)?;

    for m in &results {
        if m.period != (BIT as u64, BIT as u64) {
            println!("warning: {} bit period drifts ({}-{})", m.name, m.period.0, m.period.1);
        }
    }

    println!("Report written to {}", report_path);
    Ok(())
}
