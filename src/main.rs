// ==========================================
// 乳腺癌治疗规划系统 - 命令行入口
// ==========================================
// 子命令: assess (单条) / batch (CSV) / catalog (指南表)
// 输出: stdout 为 JSON 结果, 日志走 stderr
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use onco_planner::api::{ApiError, AssessmentApi, AssessmentRequest, AssessmentResponse};
use onco_planner::config::ConfigManager;
use onco_planner::domain::RawPatientRecord;
use onco_planner::importer::ValidationError;
use onco_planner::logging;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

// 校验失败退出码 (区别于运行错误的 1)
const EXIT_VALIDATION_FAILED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "onco-planner", version, about = "乳腺癌治疗规划 - 决策支持命令行")]
struct Cli {
    /// 配置文件 (JSON), 缺省读取用户配置目录
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 覆写配置项, 可重复: --set key=value
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 单条患者评估
    Assess(AssessArgs),
    /// CSV 批量评估
    Batch(BatchArgs),
    /// 输出指南方案表
    Catalog,
}

#[derive(Debug, Args)]
struct AssessArgs {
    /// 患者记录 JSON 文件, "-" 表示标准输入
    #[arg(long)]
    input: PathBuf,

    /// 模拟治疗方案
    #[arg(long, value_parser = ["none", "targetImmuno", "targetHormonal", "combined"])]
    arm: Option<String>,

    /// 附带四方案对比: --compare 开启, --compare=false 关闭; 缺省取配置
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    compare: Option<bool>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// 患者记录 CSV 文件
    #[arg(long)]
    csv: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    apply_overrides(&mut manager, &cli.overrides)?;

    let config = manager.config().clone();
    logging::init_with(&config.log_filter, config.log_format);
    tracing::debug!(source = ?manager.source(), version = onco_planner::VERSION, "配置就绪");

    let pretty = config.pretty_json;
    let api = AssessmentApi::new(config).context("初始化评估接口失败")?;

    match cli.command {
        Commands::Assess(args) => {
            let record = read_record(&args.input)?;
            let outcome = run_assess(&api, record, args)?;
            match &outcome {
                AssessOutcome::Assessed(response) => print_json(response, pretty)?,
                AssessOutcome::Rejected(errors) => print_json(errors, pretty)?,
            }
            if outcome.exit_code() != 0 {
                std::process::exit(outcome.exit_code());
            }
        }
        Commands::Batch(args) => {
            let report = api
                .evaluate_csv(&args.csv)
                .with_context(|| format!("批量评估失败: {}", args.csv.display()))?;
            print_json(&report, pretty)?;
        }
        Commands::Catalog => print_json(&api.catalog(), pretty)?,
    }

    Ok(())
}

/// 逐条应用 --set key=value 覆写
fn apply_overrides(manager: &mut ConfigManager, overrides: &[String]) -> Result<()> {
    for item in overrides {
        let (key, value) = match item.split_once('=') {
            Some(pair) => pair,
            None => bail!("--set 参数格式应为 key=value: {}", item),
        };
        manager
            .set(key.trim(), value)
            .with_context(|| format!("覆写配置失败: {}", item))?;
    }
    Ok(())
}

/// 单条评估结果 (校验失败单独区分, 对应退出码 2)
enum AssessOutcome {
    Assessed(Box<AssessmentResponse>),
    Rejected(Vec<ValidationError>),
}

impl AssessOutcome {
    fn exit_code(&self) -> i32 {
        match self {
            AssessOutcome::Assessed(_) => 0,
            AssessOutcome::Rejected(_) => EXIT_VALIDATION_FAILED,
        }
    }
}

fn build_request(record: RawPatientRecord, args: AssessArgs) -> AssessmentRequest {
    let mut request = AssessmentRequest::new(record);
    request.arm = args.arm;
    request.compare = args.compare;
    request
}

fn run_assess(
    api: &AssessmentApi,
    record: RawPatientRecord,
    args: AssessArgs,
) -> Result<AssessOutcome> {
    match api.evaluate(build_request(record, args)) {
        Ok(response) => Ok(AssessOutcome::Assessed(Box::new(response))),
        Err(ApiError::ValidationFailed(errors)) => Ok(AssessOutcome::Rejected(errors)),
        Err(err) => Err(err).context("评估失败"),
    }
}

/// 读取单条患者记录 JSON
fn read_record(path: &Path) -> Result<RawPatientRecord> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("读取标准输入失败")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("读取输入文件失败: {}", path.display()))?
    };

    serde_json::from_str(&raw).context("患者记录 JSON 解析失败")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
