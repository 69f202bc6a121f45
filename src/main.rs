use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rangetree::{FnFold, LazySegmentTree, MergeSortTree, SegmentTree};

#[derive(Parser, Debug)]
#[command(name = "rangetree", about = "Range-query engine demo: segment trees over a value list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FoldOp {
    Sum,
    Min,
    Max,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold an aggregate (sum/min/max) over a range, optionally after a point update.
    Fold {
        /// Comma-separated integer values, e.g. 1,3,5,7,9,11
        values: String,
        /// Inclusive range start.
        start: usize,
        /// Inclusive range end.
        end: usize,
        /// Aggregate to fold.
        #[arg(long, value_enum, default_value = "sum")]
        op: FoldOp,
        /// Apply `index=value` as a point update before querying.
        #[arg(long)]
        set: Option<String>,
    },
    /// Add a delta to every element of a range, then report range sums.
    RangeAdd {
        /// Comma-separated integer values.
        values: String,
        /// Inclusive range start of the add.
        start: usize,
        /// Inclusive range end of the add.
        end: usize,
        /// Delta to add (may be negative).
        delta: i64,
    },
    /// Order statistics: k-th smallest and count-in-window over a range.
    Kth {
        /// Comma-separated integer values.
        values: String,
        /// Inclusive range start.
        start: usize,
        /// Inclusive range end.
        end: usize,
        /// 1-indexed rank.
        k: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fold {
            values,
            start,
            end,
            op,
            set,
        } => run_fold(&values, start, end, op, set.as_deref())?,
        Commands::RangeAdd {
            values,
            start,
            end,
            delta,
        } => run_range_add(&values, start, end, delta)?,
        Commands::Kth {
            values,
            start,
            end,
            k,
        } => run_kth(&values, start, end, k)?,
    }

    Ok(())
}

fn parse_values(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(|item| {
            item.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid integer value '{}'", item.trim()))
        })
        .collect()
}

fn run_fold(raw: &str, start: usize, end: usize, op: FoldOp, set: Option<&str>) -> Result<()> {
    let values = parse_values(raw)?;
    // Plain fn pointers keep the three arms the same FnFold type
    let fold: FnFold<i64, fn(&i64, &i64) -> i64> = match op {
        FoldOp::Sum => FnFold::new(0, |a, b| a + b),
        FoldOp::Min => FnFold::new(i64::MAX, |a, b| (*a).min(*b)),
        FoldOp::Max => FnFold::new(i64::MIN, |a, b| (*a).max(*b)),
    };
    let mut tree = SegmentTree::build(&values, fold).context("building segment tree")?;

    if let Some(assignment) = set {
        let (index, value) = assignment
            .split_once('=')
            .context("--set expects index=value")?;
        let index: usize = index.trim().parse().context("invalid update index")?;
        let value: i64 = value.trim().parse().context("invalid update value")?;
        tree.update(index, value)
            .with_context(|| format!("updating index {index}"))?;
        println!("after update {index} = {value}:");
    }

    let result = tree
        .query(start, end)
        .with_context(|| format!("querying [{start}, {end}]"))?;
    println!("{op:?} of [{start}, {end}] = {result}");
    Ok(())
}

fn run_range_add(raw: &str, start: usize, end: usize, delta: i64) -> Result<()> {
    let values = parse_values(raw)?;
    let full = values.len() - 1;
    let mut tree = LazySegmentTree::build(&values).context("building lazy segment tree")?;

    let before = tree.query(0, full)?;
    tree.range_add(start, end, delta)
        .with_context(|| format!("adding {delta} over [{start}, {end}]"))?;
    let after = tree.query(0, full)?;

    println!("sum [0, {full}] before = {before}");
    println!("sum [0, {full}] after +{delta} over [{start}, {end}] = {after}");
    Ok(())
}

fn run_kth(raw: &str, start: usize, end: usize, k: usize) -> Result<()> {
    let values = parse_values(raw)?;
    if values.is_empty() {
        bail!("no values supplied");
    }
    let tree = MergeSortTree::build(&values).context("building merge-sort tree")?;

    let kth = tree
        .kth_smallest(start, end, k)
        .with_context(|| format!("rank {k} in [{start}, {end}]"))?;
    let below = tree.count_less_or_equal(start, end, kth)?;
    println!("{k}-th smallest in [{start}, {end}] = {kth}");
    println!("{below} element(s) in [{start}, {end}] are <= {kth}");
    Ok(())
}
