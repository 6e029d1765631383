use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::{error, LevelFilter};

use mm1k_sim::config::{MEAN_INTERARRIVAL_TIME, MEAN_SERVICE_TIME, POPULATION, RAND_NUM, SYSTEM_CAPACITY};
use mm1k_sim::sweep::{self, SweepConfig};
use mm1k_sim::theory;
use mm1k_sim::{Result, Simulation, SimulationConfig};

/// M/M/1/K queue simulator
#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Mean packet interarrival time [s]
    #[clap(short = 'A', long = "mean-ia-time", default_value_t = MEAN_INTERARRIVAL_TIME)]
    mean_ia_time: f64,

    /// Mean packet service time [s]
    #[clap(short = 'S', long = "mean-svc-time", default_value_t = MEAN_SERVICE_TIME)]
    mean_svc_time: f64,

    /// Number of packets to generate
    #[clap(short = 'N', long = "num-packets", default_value_t = POPULATION)]
    num_packets: usize,

    /// Seed for random number generation
    #[clap(short = 'R', long = "random-seed", default_value_t = RAND_NUM)]
    random_seed: u64,

    /// System capacity: maximum number of packets waiting or in service
    #[clap(short = 'K', long = "k-capacity", default_value_t = SYSTEM_CAPACITY)]
    k_capacity: usize,

    /// Keep per-packet timelines (default)
    #[clap(long, overrides_with = "no_trace")]
    trace: bool,

    /// Drop per-packet timelines
    #[clap(long = "no-trace", overrides_with = "trace")]
    no_trace: bool,

    /// Sweep arrival rates and capacities instead of a single run
    #[clap(long)]
    sweep: bool,

    /// Service rate used by the sweep [1/s]
    #[clap(long, default_value_t = 100.)]
    service_rate: f64,

    /// Arrival rates used by the sweep [1/s]
    #[clap(long, value_delimiter = ',', default_value = "5,10,15,20,25,30,35,40,45,50,55,60,65,70,75,80,85,90,95")]
    arrival_rates: Vec<f64>,

    /// Capacities used by the sweep
    #[clap(long, value_delimiter = ',', default_value = "10,25,50")]
    capacities: Vec<usize>,

    /// CSV file receiving the sweep results
    #[clap(long)]
    output: Option<String>,

    /// Debug-level logging
    #[clap(long, short)]
    verbose: bool,
}

impl Args {
    fn trace(&self) -> bool {
        self.trace || !self.no_trace
    }
}

fn init_logger(level: LevelFilter) {
    Builder::new()
        .filter(Some("mm1k_sim"), level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn run_single(args: &Args) -> Result<()> {
    let config = SimulationConfig::new(args.mean_ia_time, args.mean_svc_time, args.k_capacity, args.num_packets, args.random_seed)
        .with_trace(args.trace());
    let report = Simulation::new(config.clone())?.run()?;
    let result = report.result;
    let rho = config.utilization();

    println!("Utilization = {:.4}, Capacity = {}, Packets = {}", rho, config.capacity, config.job_count);
    println!("Customer Rejection Rate (simulation) = {:.6}, Losses = {}", result.loss_probability(), result.loss_count);
    println!("Customer Rejection Rate (theoretical) = {:.6}, (legacy ratio) = {:.6}",
             theory::rejection_probability(rho, config.capacity), theory::admitted_to_rejected_ratio(rho, config.capacity));
    println!("Average waiting time = {:.4E}s (theoretical {:.4E}s, std dev {:.4E}s), Peak occupancy = {}",
             result.mean_wait_time,
             theory::mean_wait_time(1. / config.mean_interarrival_time, 1. / config.mean_service_time, config.capacity),
             report.stats.wait_time_std_dev(), report.stats.peak_occupancy());
    Ok(())
}

fn run_sweep(args: &Args) -> Result<()> {
    let config = SweepConfig {
        service_rate: args.service_rate,
        arrival_rates: args.arrival_rates.clone(),
        capacities: args.capacities.clone(),
        job_count: args.num_packets,
        seed: args.random_seed,
        trace: args.trace(),
    };
    let rows = sweep::run_sweep(&config)?;
    for row in &rows {
        println!("Arrival rate = {}, Capacity = {}, Customer Rejection Rate (theoretical) = {:.6}, (legacy ratio) = {:.6}, (simulation) = {:.6}, \
                  Average waiting time (theoretical) = {:.4E}s, (simulation) = {:.4E}s",
                 row.arrival_rate, row.capacity, row.theoretical_rejection, row.legacy_rejection_ratio,
                 row.simulated_rejection, row.theoretical_mean_wait_time, row.mean_wait_time);
    }
    if let Some(ref path) = args.output {
        sweep::write_csv(path, &rows)?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info });

    let res = if args.sweep { run_sweep(&args) } else { run_single(&args) };
    if let Err(e) = res {
        error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &[&str]) -> Args {
        let argv: Vec<&str> = std::iter::once("mm1k_sim").chain(flags.iter().cloned()).collect();
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn tracing_is_on_by_default() {
        assert!(parse(&[]).trace());
    }

    #[test]
    fn last_trace_flag_wins() {
        assert!(!parse(&["--no-trace"]).trace());
        assert!(!parse(&["--trace", "--no-trace"]).trace());
        assert!(parse(&["--no-trace", "--trace"]).trace());
    }

    #[test]
    fn sweep_lists_are_comma_separated() {
        let args = parse(&["--sweep", "--capacities", "5,7", "--arrival-rates", "150"]);
        assert_eq!(args.capacities, vec![5, 7]);
        assert_eq!(args.arrival_rates, vec![150.]);
    }
}
