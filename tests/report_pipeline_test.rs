// ==========================================
// 报表流程集成测试
// ==========================================
// 测试目标: 文件 → 列解析 → 聚合 → 过滤 → 明细 → 导出
// ==========================================


use manobra_report::api::{ApiError, ReportOptions};
use manobra_report::config::ConfigManager;
use manobra_report::domain::types::Category;
use manobra_report::importer::ImportError;
use manobra_report::logging;
use manobra_report::AppState;
use std::fs;
use tempfile::TempDir;
use test_helpers::{create_test_state, standard_row, temp_config, write_csv, STANDARD_HEADERS};

#[test]
fn test_two_sources_merge_and_sort() {
    logging::init_test();
    let (dir, mut state) = create_test_state();

    let a = write_csv(
        dir.path(),
        "a.csv",
        &[
            STANDARD_HEADERS,
            &standard_row("C1", "EM SAIDA", "111 - ANA"),
            &standard_row("C2", "PARQUEADO", "111 - ANA"),
        ],
    );
    let b = write_csv(
        dir.path(),
        "b.csv",
        &[STANDARD_HEADERS, &standard_row("C3", "SAIDA EXPEDICAO", "222 - BIA")],
    );

    let outcome = state
        .report_api
        .process_files(&[a, b], ReportOptions::default())
        .unwrap();

    assert_eq!(outcome.summary.len(), 2);
    let ana = &outcome.summary[0];
    assert_eq!(
        (ana.matricula.as_str(), ana.manobrista.as_str(), ana.em_saida, ana.parqueados, ana.total),
        ("111", "ANA", 1, 1, 2)
    );
    let bia = &outcome.summary[1];
    assert_eq!(
        (bia.matricula.as_str(), bia.manobrista.as_str(), bia.em_saida, bia.parqueados, bia.total),
        ("222", "BIA", 1, 0, 1)
    );
    assert_eq!(outcome.metrics.total_vehicles, 3);
    assert!(outcome.failures.is_empty());
}

#[test]
fn test_partial_failure_keeps_good_sources() {
    let (dir, mut state) = create_test_state();

    let good = write_csv(
        dir.path(),
        "bom.csv",
        &[STANDARD_HEADERS, &standard_row("C1", "PARQUEADO", "5 - CARLOS")],
    );
    let missing_operator = write_csv(dir.path(), "ruim.csv", &["Status,Outro", "PARQUEADO,x"]);
    let absent = dir.path().join("nao_existe.xlsx");

    let outcome = state
        .report_api
        .process_files(&[good, missing_operator, absent], ReportOptions::default())
        .unwrap();

    assert_eq!(outcome.summary.len(), 1);
    assert_eq!(outcome.summary[0].parqueados, 1);
    assert_eq!(outcome.failures.len(), 2);
}

#[test]
fn test_all_sources_failed() {
    let (dir, mut state) = create_test_state();
    let unsupported = write_csv(dir.path(), "dados.txt", &["qualquer"]);

    let err = state
        .report_api
        .process_files(&[unsupported], ReportOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Import(ImportError::NoUsableSource { failures: 1 })
    ));
    assert!(matches!(state.report_api.summary(), Err(ApiError::NoSessionData)));
}

#[test]
fn test_headerless_legacy_layout() {
    let dir = TempDir::new().unwrap();
    let mut config = temp_config(dir.path());
    config.has_headers = false;
    let mut state = AppState::new(ConfigManager::from_config(config)).unwrap();

    let file = write_csv(
        dir.path(),
        "sem_cabecalho.csv",
        &[
            &standard_row("C1", "Expedição", "7 - DANI"),
            &standard_row("C2", "LAVAGEM", "7 - DANI"),
        ],
    );

    let outcome = state
        .report_api
        .process_files(&[file], ReportOptions::default())
        .unwrap();

    let row = &outcome.summary[0];
    assert_eq!(row.matricula, "7");
    assert_eq!(row.em_saida, 1);
    assert_eq!(row.parqueados, 0);
    assert_eq!(row.total, 2);
}

#[test]
fn test_detail_drill_down_and_exports() {
    let (dir, mut state) = create_test_state();
    let file = write_csv(
        dir.path(),
        "patio.csv",
        &[
            STANDARD_HEADERS,
            &standard_row("C1", "Em Saída", "1 - JOAO PEREIRA"),
            &standard_row("C2", "Parqueado", "2 - MARIA JOAO"),
            &standard_row("C3", "Parqueado", "3 - ANA"),
        ],
    );
    state
        .report_api
        .process_files(&[file], ReportOptions::default())
        .unwrap();

    let report = state.report_api.vehicle_detail("joao").unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].chassis, "C1");
    assert_eq!(report.rows[0].model_version, "GOL 1.0");
    assert_eq!(report.rows[0].category, Some(Category::InDispatch));
    assert_eq!(report.breakdown.parked, 1);

    let summary_path = dir.path().join("saida").join("resumo.csv");
    state.report_api.export_summary_csv(&summary_path).unwrap();
    let summary_csv = fs::read_to_string(&summary_path).unwrap();
    assert!(summary_csv.starts_with("MATRICULA,MANOBRISTA,EM SAIDA,PARQUEADOS,TOTAL"));
    assert_eq!(summary_csv.lines().count(), 4);

    let detail_path = dir.path().join("detalhe.csv");
    state
        .report_api
        .export_detail_csv("ANA", &detail_path)
        .unwrap();
    let detail_csv = fs::read_to_string(&detail_path).unwrap();
    let lines: Vec<&str> = detail_csv.lines().collect();
    assert_eq!(lines[0], "Chassi,Versão,Cor,Descrição,Status,Tipo");
    assert_eq!(lines[1], "C3,GOL 1.0,BRANCO,ENTREGA,Parqueado,PARQUEADO");
}

#[test]
fn test_new_upload_replaces_session() {
    let (dir, mut state) = create_test_state();
    let first = write_csv(
        dir.path(),
        "um.csv",
        &[STANDARD_HEADERS, &standard_row("C1", "SAIDA", "1 - ANA")],
    );
    let second = write_csv(
        dir.path(),
        "dois.csv",
        &[STANDARD_HEADERS, &standard_row("C9", "SAIDA", "2 - BIA")],
    );

    state
        .report_api
        .process_files(&[first], ReportOptions::default())
        .unwrap();
    state
        .report_api
        .process_files(&[second], ReportOptions::default())
        .unwrap();

    assert_eq!(state.report_api.operator_choices().unwrap(), vec!["BIA".to_string()]);
    assert!(state.report_api.vehicle_detail("ANA").unwrap().rows.is_empty());
}
