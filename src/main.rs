use anyhow::{Context, Result};
use bucketer::{
    BucketConfig, BucketSet, DEFAULT_BUCKET_SIZE, ItemId, ListSpecError, RemainderPolicy,
    SizingPolicy, Slot, SourceList, TaskClient, TaskLedger, create_buckets_with_seed,
    default_source_lists, logging, parse_source_list, submit_buckets,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

const DEFAULT_LEDGER: &str = "tasks.sqlite";

#[derive(Parser)]
#[command(name = "bucketer", version, about = "Allocate items from several source lists into balanced buckets")]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the allocation and print the buckets
    Allocate {
        #[command(flatten)]
        alloc: AllocArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Create and read back worker tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Create tasks, one per bucket, or a single task from --choose
    Write {
        #[arg(long)]
        title: String,

        /// Create one task with exactly these items instead of allocating
        #[arg(long, num_args = 1.., value_name = "ID")]
        choose: Option<Vec<ItemId>>,

        #[command(flatten)]
        alloc: AllocArgs,

        #[arg(long, default_value = DEFAULT_LEDGER)]
        ledger: String,
    },
    /// List tasks that have an answer
    Read {
        #[arg(long, default_value = DEFAULT_LEDGER)]
        ledger: String,

        #[arg(long)]
        json: bool,
    },
    /// Record a worker's answer for a task
    Complete {
        task_id: String,

        #[arg(long)]
        worker: String,

        #[arg(long)]
        answer: String,

        #[arg(long, default_value = DEFAULT_LEDGER)]
        ledger: String,
    },
}

#[derive(Args)]
struct AllocArgs {
    /// Source list: `2..41`, `2..=40` or `3,7,11` (repeatable; defaults to the three standard ranges)
    #[arg(short, long = "list", value_name = "SPEC", value_parser = parse_list_arg)]
    lists: Vec<ListArg>,

    #[arg(short, long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: usize,

    /// Seed for the shuffle; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = SizingArg::Increment)]
    sizing: SizingArg,

    #[arg(long, value_enum, default_value_t = RemainderArg::Truncate)]
    remainder: RemainderArg,
}

#[derive(Clone)]
struct ListArg(SourceList<ItemId>);

fn parse_list_arg(spec: &str) -> Result<ListArg, ListSpecError> {
    parse_source_list(spec).map(ListArg)
}

#[derive(Clone, Copy, ValueEnum)]
enum SizingArg {
    Increment,
    NextMultiple,
}

#[derive(Clone, Copy, ValueEnum)]
enum RemainderArg {
    Truncate,
    Reject,
}

#[derive(Serialize)]
struct AllocationOutput<'a> {
    seed: u64,
    #[serde(flatten)]
    set: &'a BucketSet<ItemId>,
}

impl AllocArgs {
    fn config(&self) -> BucketConfig {
        let sizing = match self.sizing {
            SizingArg::Increment => SizingPolicy::Increment,
            SizingArg::NextMultiple => SizingPolicy::NextMultiple,
        };
        let remainder = match self.remainder {
            RemainderArg::Truncate => RemainderPolicy::Truncate,
            RemainderArg::Reject => RemainderPolicy::Reject,
        };
        BucketConfig::new(self.bucket_size)
            .sizing(sizing)
            .remainder(remainder)
    }

    /// Run the pipeline, returning the seed actually used
    fn run(&self) -> Result<(u64, BucketSet<ItemId>)> {
        let lists: Vec<SourceList<ItemId>> = if self.lists.is_empty() {
            default_source_lists()
        } else {
            self.lists.iter().map(|l| l.0.clone()).collect()
        };

        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, lists = lists.len(), "allocating buckets");

        let set = create_buckets_with_seed(&lists, &self.config(), seed)
            .context("Bucket allocation failed")?;
        Ok((seed, set))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Allocate { alloc, json } => {
            let (seed, set) = alloc.run()?;
            if json {
                let out = serde_json::to_string_pretty(&AllocationOutput { seed, set: &set })
                    .context("Failed to serialize buckets")?;
                println!("{}", out);
            } else {
                print_buckets(seed, &set);
            }
        }
        Command::Tasks { command } => run_tasks(command)?,
    }

    Ok(())
}

fn run_tasks(command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Write {
            title,
            choose,
            alloc,
            ledger,
        } => {
            let mut ledger = TaskLedger::open(&ledger)?;
            match choose {
                Some(items) => {
                    let receipt = ledger.create_task(&title, &items)?;
                    println!("{}  {} items", receipt.task_id, receipt.item_count);
                }
                None => {
                    let (seed, set) = alloc.run()?;
                    let receipts = submit_buckets(&mut ledger, &title, &set)?;
                    for receipt in &receipts {
                        println!("{}  {} items", receipt.task_id, receipt.item_count);
                    }
                    println!("Created {} tasks (seed {})", receipts.len(), seed);
                    if set.was_truncated() {
                        println!("Dropped {} items at the bucket boundary", set.dropped.len());
                    }
                }
            }
        }
        TaskCommand::Read { ledger, json } => {
            let ledger = TaskLedger::open(&ledger)?;
            let completed = ledger.read_completed_tasks()?;
            if json {
                let out = serde_json::to_string_pretty(&completed)
                    .context("Failed to serialize completed tasks")?;
                println!("{}", out);
            } else {
                for done in &completed {
                    println!(
                        "{}  {}  items {:?}  by {}: {}",
                        done.task.id, done.task.title, done.task.items, done.worker, done.answer
                    );
                }
                let stats = ledger.get_stats()?;
                println!(
                    "{} completed, {} pending",
                    stats.completed_count,
                    stats.pending_count()
                );
            }
        }
        TaskCommand::Complete {
            task_id,
            worker,
            answer,
            ledger,
        } => {
            let ledger = TaskLedger::open(&ledger)?;
            ledger.complete_task(&task_id, &worker, &answer)?;
            println!("Recorded answer for {}", task_id);
        }
    }

    Ok(())
}

fn print_buckets(seed: u64, set: &BucketSet<ItemId>) {
    let plan = &set.plan;
    println!("Seed:            {}", seed);
    println!("Lists:           {}", plan.number_of_lists);
    println!("Longest list:    {}", plan.max_length);
    println!("Uniform length:  {}", plan.uniform_length);
    println!(
        "Buckets:         {} x {}",
        plan.number_of_buckets, plan.bucket_size
    );
    println!();

    for (i, bucket) in set.iter().enumerate() {
        let slots: Vec<String> = bucket
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Item(id) => id.to_string(),
                Slot::Empty => "-".to_string(),
            })
            .collect();
        println!("{:>4}: {}", i + 1, slots.join(" "));
    }

    if set.was_truncated() {
        println!();
        println!(
            "Dropped {} items at the bucket boundary: {:?}",
            set.dropped.len(),
            set.dropped
        );
    }
}
