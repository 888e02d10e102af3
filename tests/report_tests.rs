use alicuotas::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn invoice_row(number: &str, social_reason: &str, amounts: &[(usize, Decimal)]) -> Row {
    let mut row = vec![Cell::Empty; 23];
    row[2] = number.into();
    row[3] = social_reason.into();
    for (column, amount) in amounts {
        row[*column] = Cell::Number(*amount);
    }
    row
}

fn sample_report() -> RunReport {
    let march = vec![
        Sheet::new(
            "LIBRO IVA COMPRAS",
            vec![
                invoice_row("00004-00001021", "GS BCRIO SA", &[(6, dec!(100)), (12, dec!(21))]),
                invoice_row(
                    "00004-00001022",
                    "Transportes del Litoral SRL",
                    &[(6, dec!(1000)), (12, dec!(210)), (21, dec!(30)), (22, dec!(25))],
                ),
            ],
        ),
        Sheet::new(
            "11040536",
            vec![
                vec![
                    Cell::Empty,
                    Cell::Empty,
                    Cell::Empty,
                    "00004-00001022".into(),
                    dec!(20).into(),
                    2_i64.into(),
                ],
                vec![
                    Cell::Empty,
                    Cell::Empty,
                    Cell::Empty,
                    "00004-00001022".into(),
                    dec!(5).into(),
                    21_i64.into(),
                ],
            ],
        ),
    ];
    let april = vec![
        Sheet::new(
            "IVA COMPRAS",
            vec![
                invoice_row("00007-00000310", "Papelera Norte SA", &[(6, dec!(500)), (16, dec!(52.5))]),
                invoice_row("00007-00000311", "Papelera Norte SA", &[(8, dec!(800))]),
            ],
        ),
        Sheet::new("11040536", Vec::new()),
    ];

    let mut agg = Aggregator::new(ExtractionConfig::default());
    agg.add_document("2024-03/CM03.xlsx", &march).unwrap();
    agg.add_document("2024-04/CM03.xlsx", &april).unwrap();
    agg.finish()
}

#[test]
fn text_report() {
    insta::assert_snapshot!(sample_report().to_string().trim_end(), @r###"
    2024-03/CM03.xlsx: 1 invoices, 1 combinations
      00004-00001021 ignored according to "Razón social: GS BCRIO SA"
    2024-04/CM03.xlsx: 2 invoices, 1 combinations
    FOUND 2 UNIQUE TAX COMBINATION:
    IV 10.5%
    IV 21% IV PER 3.0000 BUENOS AIRES: 2.0000 SANTA FE: 0.5000
    "###);
}

#[test]
fn json_report_shape() {
    let report = sample_report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["files"][0]["path"], "2024-03/CM03.xlsx");
    assert_eq!(json["files"][0]["excluded"][0]["social_reason"], "GS BCRIO SA");
    assert_eq!(json["files"][1]["invoices"], 2);
    assert_eq!(json["combinations"][0], "IV 10.5%");

    let back: RunReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
