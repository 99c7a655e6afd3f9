use std::collections::HashMap;
use std::rc::Rc;

use clap::Parser;

use nnf_amc::eval::{EvalConfig, Strategy};
use nnf_amc::grad::GradAlgebra;
use nnf_amc::nnf::Nnf;
use nnf_amc::sat::{BoolAlgebra, CountAlgebra};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of variables.
    #[arg(value_name = "INT", default_value = "8")]
    n: u32,

    /// Probability of each variable being true.
    #[clap(long, value_name = "FLOAT", default_value = "0.5")]
    prob: f64,

    /// Evaluate shared nodes once per occurrence.
    #[clap(long)]
    tree: bool,

    /// Enable debug logging.
    #[clap(long)]
    verbose: bool,
}

/// Smooth d-DNNF for "exactly one of x1..xn is true":
/// `Or_i (x_i & And_{j != i} ~x_j)`, with the negative literals shared.
fn exactly_one(n: u32) -> Nnf<u32> {
    let negs: Vec<Rc<Nnf<u32>>> = (1..=n).map(|j| Rc::new(Nnf::lit(j, false))).collect();
    Nnf::or((1..=n).map(|i| {
        let term = (1..=n).map(|j| {
            if j == i {
                Rc::new(Nnf::var(i))
            } else {
                negs[(j - 1) as usize].clone()
            }
        });
        Nnf::and_shared(term)
    }))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let strategy = if args.tree { Strategy::Tree } else { Strategy::Shared };
    let config = EvalConfig::default().with_strategy(strategy);

    println!("Encoding exactly-one constraint over n = {} variables", args.n);
    let f = exactly_one(args.n);
    println!("f has {} distinct nodes", f.size());
    if args.n <= 4 {
        println!("f = {}", f);
    }

    let sat = nnf_amc::evaluate_with(&f, &BoolAlgebra, &config);
    println!("sat = {}", sat);

    let count = nnf_amc::evaluate_with(&f, &CountAlgebra, &config);
    println!("num_sat = {}", count);

    let probs: HashMap<u32, f64> = (1..=args.n).map(|v| (v, args.prob)).collect();
    let p = nnf_amc::evaluate_with(&f, &GradAlgebra::for_nnf(&f, &probs, None)?, &config).value;
    println!("P(f) = {:.6}", p);

    for v in 1..=args.n {
        let d = nnf_amc::evaluate_with(&f, &GradAlgebra::for_nnf(&f, &probs, Some(&v))?, &config);
        println!("dP(f)/dP(x{}) = {:.6}", v, d.deriv);
    }

    // Cross-check against the checked entry point.
    let d = nnf_amc::grad(&f, &probs, Some(&1))?;
    println!("grad(x1) = {}", d);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
