// ==========================================
// manobrista 产能报表 - 命令行入口
// ==========================================
// 每条命令先认证；用户管理与配置初始化需要管理员
// 日志写 stderr，报表写 stdout
// ==========================================

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use manobra_report::api::{ApiError, NewUser, ReportOptions, UserInfo};
use manobra_report::app::AppState;
use manobra_report::config::{ConfigManager, CONFIG_ENV_VAR};
use manobra_report::domain::{
    AccessLevel, AccountUpdate, EmployeeRecord, EmployeeType, EmployeeUpdate, SummaryMetrics,
    SummaryRow, UserAccount, VehicleDetailRow,
};
use manobra_report::engine::top_n;
use manobra_report::i18n::{self, t, t_with_args};
use manobra_report::{exporter, logging};

#[derive(Parser)]
#[command(name = "manobra-report")]
#[command(version, about = "Relatório de produtividade de manobristas", long_about = None)]
struct Cli {
    /// Arquivo de configuração JSON
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    #[arg(long, short = 'u', global = true, env = "MANOBRA_USER")]
    user: Option<String>,

    #[arg(long, short = 'p', global = true, env = "MANOBRA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Idioma das mensagens (pt-BR, en)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Log detalhado em stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Processa planilhas e mostra o resumo por manobrista
    Report {
        /// Planilhas de entrada (.xlsx, .xls, .csv)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Remove manobristas terceirizados
        #[arg(long)]
        exclude_third_party: bool,
        /// Mantém apenas funcionários cadastrados e ativos
        #[arg(long)]
        only_registered: bool,
        /// Mostra apenas os N primeiros
        #[arg(long)]
        top: Option<usize>,
        /// Exporta o resumo em CSV
        #[arg(long)]
        out: Option<PathBuf>,
        /// Escreve o resultado em JSON no stdout
        #[arg(long)]
        json: bool,
    },
    /// Detalha os veículos de um manobrista
    Detail {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Manobrista (busca por trecho, sem diferenciar maiúsculas)
        #[arg(long, short = 'o')]
        operator: String,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Cadastro de funcionários
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Usuários do sistema (somente admin)
    #[command(subcommand)]
    User(UserCommand),
    /// Configuração efetiva
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum EmployeeCommand {
    List {
        #[arg(long)]
        active: bool,
    },
    Add {
        #[arg(long)]
        matricula: String,
        #[arg(long)]
        nome: String,
        #[arg(long, default_value = "interno")]
        tipo: EmployeeType,
        #[arg(long)]
        inativo: bool,
    },
    Update {
        matricula: String,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        tipo: Option<EmployeeType>,
        #[arg(long)]
        ativo: Option<bool>,
    },
    Remove {
        matricula: String,
    },
    Search {
        query: String,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    List,
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        nome: String,
        #[arg(long, default_value = "operador")]
        nivel: AccessLevel,
        #[arg(long)]
        inativo: bool,
    },
    Update {
        username: String,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        nivel: Option<AccessLevel>,
        #[arg(long)]
        ativo: Option<bool>,
    },
    Remove {
        username: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Mostra a configuração em uso
    Show,
    /// Grava a configuração em uso no arquivo de configuração (somente admin)
    Init,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = ConfigManager::load_or_default(cli.config.as_deref())
        .context("falha ao carregar a configuração")?;
    match cli.lang.as_deref() {
        Some(lang) => i18n::set_locale(lang),
        None => i18n::set_locale(&config.config().locale),
    }

    let mut state = AppState::new(config).context("falha ao abrir os cadastros")?;
    let actor = authenticate(&state, cli.user.as_deref(), cli.password.as_deref())?;
    tracing::info!(user = %actor.username, "命令开始执行");

    match cli.command {
        Commands::Report {
            files,
            exclude_third_party,
            only_registered,
            top,
            out,
            json,
        } => {
            let options = ReportOptions {
                exclude_third_party,
                only_registered,
            };
            let outcome = state.report_api.process_files(&files, options)?;

            for failure in &outcome.failures {
                eprintln!(
                    "{}",
                    t_with_args(
                        "import.source_skipped",
                        &[("source", failure.source.as_str()), ("message", failure.message.as_str())]
                    )
                );
            }

            if json {
                exporter::write_json(&outcome, std::io::stdout().lock())?;
                println!();
            } else {
                let rows = match top {
                    Some(n) => top_n(&outcome.summary, n),
                    None => &outcome.summary[..],
                };
                print_summary(rows);
                print_metrics(&outcome.metrics);

                let filters = &outcome.filters_applied;
                if exclude_third_party {
                    println!(
                        "{}",
                        t_with_args(
                            "report.third_party_removed",
                            &[("count", filters.third_party_removed.to_string().as_str())]
                        )
                    );
                }
                if only_registered {
                    if filters.registry_applied {
                        println!(
                            "{}",
                            t_with_args(
                                "report.registry_applied",
                                &[("count", filters.registry_removed.to_string().as_str())]
                            )
                        );
                    } else {
                        println!("{}", t("report.registry_not_applied"));
                    }
                }
            }

            if let Some(path) = out {
                state.report_api.export_summary_csv(&path)?;
                eprintln!(
                    "{}",
                    t_with_args("report.exported", &[("path", path.display().to_string().as_str())])
                );
            }
        }
        Commands::Detail {
            files,
            operator,
            out,
            json,
        } => {
            state
                .report_api
                .process_files(&files, ReportOptions::default())?;
            let report = state.report_api.vehicle_detail(&operator)?;

            if json {
                exporter::write_json(&report, std::io::stdout().lock())?;
                println!();
            } else if report.rows.is_empty() {
                println!(
                    "{}",
                    t_with_args("detail.no_match", &[("operator", report.operator.as_str())])
                );
            } else {
                print_detail(&report.rows);
                let b = &report.breakdown;
                println!(
                    "{}",
                    t_with_args(
                        "detail.breakdown",
                        &[
                            ("total", b.total.to_string().as_str()),
                            ("dispatch", b.in_dispatch.to_string().as_str()),
                            ("parked", b.parked.to_string().as_str()),
                            ("unclassified", b.unclassified.to_string().as_str()),
                        ]
                    )
                );
            }

            if let Some(path) = out {
                exporter::export_detail_file(&report.rows, &path)?;
                eprintln!(
                    "{}",
                    t_with_args("detail.exported", &[("path", path.display().to_string().as_str())])
                );
            }
        }
        Commands::Employee(command) => run_employee(&state, command)?,
        Commands::User(command) => run_user(&state, &actor, command)?,
        Commands::Config(ConfigCommand::Show) => {
            exporter::write_json(state.config.config(), std::io::stdout().lock())?;
            println!();
        }
        Commands::Config(ConfigCommand::Init) => {
            if !actor.is_admin() {
                return Err(ApiError::PermissionDenied(actor.username.clone()).into());
            }
            if state.config.config_path().is_none() {
                bail!("informe --config ou {} para gravar a configuração", CONFIG_ENV_VAR);
            }
            // --lang 覆盖的语言一并写入
            if let Some(lang) = cli.lang {
                state.config.config_mut().locale = lang;
            }
            state.config.save()?;
            println!("{}", t("common.success"));
        }
    }

    Ok(())
}

fn authenticate(
    state: &AppState,
    user: Option<&str>,
    password: Option<&str>,
) -> anyhow::Result<UserAccount> {
    let (Some(user), Some(password)) = (user, password) else {
        bail!(t("auth.missing_credentials"));
    };
    match state.account_api.login(user, password) {
        Ok(account) => Ok(account),
        Err(ApiError::AuthenticationFailed) => bail!(t("auth.failed")),
        Err(e) => Err(e.into()),
    }
}

fn run_employee(state: &AppState, command: EmployeeCommand) -> anyhow::Result<()> {
    let api = &state.employee_api;
    match command {
        EmployeeCommand::List { active } => print_employees(&api.list(active)?),
        EmployeeCommand::Search { query } => print_employees(&api.search(&query)?),
        EmployeeCommand::Add {
            matricula,
            nome,
            tipo,
            inativo,
        } => {
            api.add(
                EmployeeRecord::new(matricula.clone(), nome)
                    .with_tipo(tipo)
                    .with_ativo(!inativo),
            )?;
            println!("{}", t_with_args("employee.added", &[("matricula", matricula.trim())]));
        }
        EmployeeCommand::Update {
            matricula,
            nome,
            tipo,
            ativo,
        } => {
            api.update(&matricula, EmployeeUpdate { nome, tipo, ativo })?;
            println!("{}", t_with_args("employee.updated", &[("matricula", matricula.as_str())]));
        }
        EmployeeCommand::Remove { matricula } => {
            api.remove(&matricula)?;
            println!("{}", t_with_args("employee.removed", &[("matricula", matricula.as_str())]));
        }
    }
    Ok(())
}

fn run_user(state: &AppState, actor: &UserAccount, command: UserCommand) -> anyhow::Result<()> {
    let api = &state.account_api;
    match command {
        UserCommand::List => print_users(&api.list_users(actor)?),
        UserCommand::Add {
            username,
            new_password,
            nome,
            nivel,
            inativo,
        } => {
            api.add_user(
                actor,
                NewUser {
                    username: username.clone(),
                    password: new_password,
                    nome_completo: nome,
                    nivel_acesso: nivel,
                    ativo: !inativo,
                },
            )?;
            println!("{}", t_with_args("user.added", &[("username", username.as_str())]));
        }
        UserCommand::Update {
            username,
            new_password,
            nome,
            nivel,
            ativo,
        } => {
            api.update_user(
                actor,
                &username,
                AccountUpdate {
                    nome_completo: nome,
                    nivel_acesso: nivel,
                    ativo,
                    password: new_password,
                },
            )?;
            println!("{}", t_with_args("user.updated", &[("username", username.as_str())]));
        }
        UserCommand::Remove { username } => {
            api.remove_user(actor, &username)?;
            println!("{}", t_with_args("user.removed", &[("username", username.as_str())]));
        }
    }
    Ok(())
}

// ==========================================
// 文本输出
// ==========================================

fn print_summary(rows: &[SummaryRow]) {
    if rows.is_empty() {
        println!("{}", t("report.empty"));
        return;
    }
    println!(
        "{:<12} {:<32} {:>8} {:>10} {:>6}",
        "MATRICULA", "MANOBRISTA", "EM SAIDA", "PARQUEADOS", "TOTAL"
    );
    for row in rows {
        println!(
            "{:<12} {:<32} {:>8} {:>10} {:>6}",
            row.matricula, row.manobrista, row.em_saida, row.parqueados, row.total
        );
    }
}

fn print_metrics(metrics: &SummaryMetrics) {
    println!(
        "{}",
        t_with_args(
            "report.metrics",
            &[
                ("operators", metrics.total_operators.to_string().as_str()),
                ("vehicles", metrics.total_vehicles.to_string().as_str()),
                ("dispatch", metrics.total_in_dispatch.to_string().as_str()),
                ("parked", metrics.total_parked.to_string().as_str()),
                ("average", format!("{:.1}", metrics.average_per_operator).as_str()),
            ]
        )
    );
}

fn print_detail(rows: &[VehicleDetailRow]) {
    println!(
        "{:<20} {:<24} {:<12} {:<24} {:<16} {:<10}",
        "Chassi", "Versão", "Cor", "Descrição", "Status", "Tipo"
    );
    for row in rows {
        println!(
            "{:<20} {:<24} {:<12} {:<24} {:<16} {:<10}",
            row.chassis,
            row.model_version,
            row.color,
            row.description,
            row.status,
            row.tipo_label()
        );
    }
}

fn print_employees(records: &[EmployeeRecord]) {
    if records.is_empty() {
        println!("{}", t("employee.none"));
        return;
    }
    println!("{:<12} {:<32} {:<10} {:<6}", "matricula", "nome", "tipo", "ativo");
    for record in records {
        println!(
            "{:<12} {:<32} {:<10} {:<6}",
            record.matricula,
            record.nome,
            record.tipo,
            if record.ativo { "sim" } else { "não" }
        );
    }
}

fn print_users(users: &[UserInfo]) {
    println!("{:<16} {:<32} {:<12} {:<6}", "username", "nome_completo", "nivel", "ativo");
    for user in users {
        println!(
            "{:<16} {:<32} {:<12} {:<6}",
            user.username,
            user.nome_completo,
            user.nivel_acesso,
            if user.ativo { "sim" } else { "não" }
        );
    }
}
