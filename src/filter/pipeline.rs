use log::debug;

use super::{classify::ExclusionPatterns, collapse::DisplayCollapse, traits::Classifier};
use crate::{
    config::FilterConfig,
    sgml::{encoding, fields, prelude::*},
    types::{BlockSummary, FilterOutcome, Verdict},
};

/// Removes transaction records from a statement according to a [`Classifier`].
#[derive(Debug, Clone)]
pub struct StatementFilter<C = ExclusionPatterns> {
    classifier: C,
    collapse: DisplayCollapse,
}

impl Default for StatementFilter {
    fn default() -> Self {
        Self::new(ExclusionPatterns::default())
    }
}

impl StatementFilter {
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(ExclusionPatterns::new(&config.exclusion_patterns))
            .with_collapse(DisplayCollapse::new(&config.display_collapse))
    }
}

impl<C: Classifier> StatementFilter<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            collapse: DisplayCollapse::default(),
        }
    }

    pub fn with_collapse(mut self, collapse: DisplayCollapse) -> Self {
        self.collapse = collapse;
        self
    }

    /// Filter a Latin-1 statement.
    ///
    /// Preamble, trailer and the lines between records are copied unchanged;
    /// excluded records are dropped and kept ones stay in their original
    /// order. Every record appears exactly once in the report.
    pub fn filter(&self, document: &[u8]) -> FilterOutcome {
        let text = encoding::decode(document);
        let parsed = segment(&text);

        let mut verdicts = Vec::with_capacity(parsed.block_count());
        let mut outcome = FilterOutcome::default();

        for block in parsed.blocks() {
            let summary = self.summarize(block);
            verdicts.push(summary.verdict);
            match summary.verdict {
                Verdict::Keep => outcome.kept.push(summary),
                Verdict::Exclude => outcome.excluded.push(summary),
            }
        }

        let filtered = parsed.reassemble(|index, _| verdicts[index].is_keep());
        outcome.filtered = encoding::encode(&filtered).into_owned();

        debug!(
            "filtered {} records: {} excluded, {} kept",
            verdicts.len(),
            outcome.excluded.len(),
            outcome.kept.len()
        );
        outcome
    }

    fn summarize(&self, block: &Block<'_>) -> BlockSummary {
        let memo = extract_memo(block);
        BlockSummary {
            verdict: self.classifier.classify(&memo),
            memo: self.collapse.display(&memo),
            transaction_type: fields::transaction_type(block),
            posted: fields::posted_date(block),
            amount: fields::amount(block),
            fitid: fields::fitid(block),
        }
    }
}

/// Filter with the built-in exclusion patterns.
pub fn filter_and_reassemble(document: &[u8]) -> FilterOutcome {
    <StatementFilter>::default().filter(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Memo, NO_MEMO};
    use rstest::rstest;

    const PREAMBLE: &str = "OFXHEADER:100\r\n\
DATA:OFXSGML\r\n\
VERSION:102\r\n\
ENCODING:USASCII\r\n\
CHARSET:1252\r\n\
\r\n\
<OFX>\r\n\
<BANKMSGSRSV1>\r\n\
<STMTTRNRS>\r\n\
<STMTRS>\r\n\
<CURDEF>BRL\r\n\
<BANKACCTFROM>\r\n\
<BANKID>0341\r\n\
<ACCTID>12345-6\r\n\
<ACCTTYPE>CHECKING\r\n\
</BANKACCTFROM>\r\n\
<BANKTRANLIST>\r\n\
<DTSTART>20250301\r\n\
<DTEND>20250331\r\n";

    const TRAILER: &str = "</BANKTRANLIST>\r\n\
<LEDGERBAL>\r\n\
<BALAMT>1250.00\r\n\
<DTASOF>20250331\r\n\
</LEDGERBAL>\r\n\
</STMTRS>\r\n\
</STMTTRNRS>\r\n\
</BANKMSGSRSV1>\r\n\
</OFX>\r\n";

    fn record(fitid: &str, amount: &str, memo: Option<&str>) -> String {
        let memo_line = memo.map(|m| format!("<MEMO>{m}\r\n")).unwrap_or_default();
        format!(
            "<STMTTRN>\r\n<TRNTYPE>DEBIT\r\n<DTPOSTED>20250310100000[-3:BRT]\r\n<TRNAMT>{amount}\r\n<FITID>{fitid}\r\n{memo_line}</STMTTRN>\r\n"
        )
    }

    fn statement(records: &[String]) -> String {
        format!("{PREAMBLE}{}{TRAILER}", records.concat())
    }

    #[test]
    fn test_sample_scenario() {
        let redemption = record("1", "100.00", Some("RESGATE INVEST FACIL<MEMO>"));
        let boleto = record("2", "-50.00", Some("PAGAMENTO BOLETO"));
        let input = statement(&[redemption, boleto.clone()]);

        let outcome = filter_and_reassemble(input.as_bytes());

        assert_eq!(outcome.excluded_memos(), vec!["RESGATE INVEST FACIL"]);
        assert_eq!(outcome.kept_memos(), vec!["PAGAMENTO BOLETO"]);
        assert_eq!(outcome.filtered, statement(&[boleto]).into_bytes());
    }

    #[rstest]
    #[case::no_records(statement(&[]))]
    #[case::kept_records(statement(&[record("1", "-10.00", Some("PIX ENVIADO")), record("2", "-20.00", None)]))]
    #[case::no_markers("HEADER\nNO TAGS HERE\n".to_string())]
    #[case::empty(String::new())]
    #[case::unclosed(format!("{PREAMBLE}<STMTTRN>\r\n<MEMO>TED\r\n"))]
    fn test_round_trip_without_matches(#[case] input: String) {
        let outcome = filter_and_reassemble(input.as_bytes());
        assert_eq!(outcome.filtered, input.into_bytes());
        assert!(outcome.excluded.is_empty());
    }

    #[test]
    fn test_excluded_unclosed_record_keeps_trailer() {
        let pix = record("1", "-10.00", Some("PIX"));
        let input = format!("{PREAMBLE}{pix}<STMTTRN>\r\n<MEMO>RESGATE INVEST FACIL\r\n{TRAILER}");

        let outcome = filter_and_reassemble(input.as_bytes());

        assert_eq!(outcome.excluded_memos(), vec!["RESGATE INVEST FACIL"]);
        assert_eq!(outcome.filtered, statement(&[pix]).into_bytes());
    }

    #[test]
    fn test_no_marker_input() {
        let outcome = filter_and_reassemble(b"HEADER\nNO TAGS HERE\n");
        assert_eq!(outcome.filtered, b"HEADER\nNO TAGS HERE\n");
        assert!(outcome.excluded.is_empty());
        assert!(outcome.kept.is_empty());
    }

    #[test]
    fn test_conservation_and_order() {
        let memos = [
            "APLIC.AUTOM.INVESTFACIL",
            "PIX RECEBIDO",
            "Aplic.Invest Facil***",
            "TARIFA",
            "RESG.AUTOM.INVEST FACIL 0001",
            "SAQUE",
        ];
        let records: Vec<String> = memos
            .iter()
            .enumerate()
            .map(|(i, &memo)| record(&i.to_string(), "-1.00", Some(memo)))
            .collect();
        let input = statement(&records);

        let outcome = filter_and_reassemble(input.as_bytes());

        assert_eq!(outcome.block_count(), memos.len());
        assert_eq!(outcome.kept_memos(), vec!["PIX RECEBIDO", "TARIFA", "SAQUE"]);
        assert_eq!(
            outcome.excluded_memos(),
            vec!["APLIC.AUTOM.INVESTFACIL", "Aplic.Invest Facil***", "RESG.AUTOM.INVEST FACIL"]
        );
        let expected = statement(&[records[1].clone(), records[3].clone(), records[5].clone()]);
        assert_eq!(outcome.filtered, expected.into_bytes());
    }

    #[test]
    fn test_second_pass_is_noop() {
        let input = statement(&[
            record("1", "100.00", Some("RESGATE INVEST FACIL")),
            record("2", "-50.00", Some("PAGAMENTO BOLETO")),
            record("3", "-100.00", Some("APLIC.INVEST FACIL")),
        ]);

        let first = filter_and_reassemble(input.as_bytes());
        let second = filter_and_reassemble(&first.filtered);

        assert_eq!(second.filtered, first.filtered);
        assert!(second.excluded.is_empty());
        assert_eq!(second.kept_memos(), first.kept_memos());
    }

    #[test]
    fn test_missing_memo_is_kept_with_placeholder() {
        let input = statement(&[record("1", "-5.00", None)]);
        let outcome = filter_and_reassemble(input.as_bytes());

        assert_eq!(outcome.kept_memos(), vec![NO_MEMO]);
        assert_eq!(outcome.filtered, input.into_bytes());
    }

    #[test]
    fn test_latin1_bytes_are_preserved() {
        let mut input = statement(&[record("1", "-5.00", Some("CR#DITO"))]).into_bytes();
        let at = input.iter().position(|&b| b == b'#').unwrap();
        input[at] = 0xC9;
        input.extend_from_slice(b"\xe7\xe3\x80\r\n");

        let outcome = filter_and_reassemble(&input);

        assert_eq!(outcome.kept_memos(), vec!["CR\u{c9}DITO"]);
        assert_eq!(outcome.filtered, input);
    }

    #[test]
    fn test_accented_memo_is_excluded() {
        let mut input = statement(&[
            record("1", "100.00", Some("RESGATE INVEST F@CIL")),
            record("2", "-1.00", Some("PIX")),
        ])
        .into_bytes();
        let at = input.iter().position(|&b| b == b'@').unwrap();
        input[at] = 0xC1;

        let outcome = filter_and_reassemble(&input);

        assert_eq!(outcome.excluded_memos(), vec!["RESGATE INVEST FACIL"]);
        assert_eq!(outcome.kept_memos(), vec!["PIX"]);
    }

    #[test]
    fn test_summary_fields_and_totals() {
        let input = statement(&[
            record("1", "100,50", Some("RESGATE INVEST FACIL")),
            record("2", "-50.00", Some("PAGAMENTO BOLETO")),
        ]);

        let outcome = filter_and_reassemble(input.as_bytes());

        let excluded = &outcome.excluded[0];
        assert_eq!(excluded.fitid.as_deref(), Some("1"));
        assert_eq!(excluded.transaction_type.as_deref(), Some("DEBIT"));
        assert_eq!(excluded.posted, chrono::NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(outcome.excluded_total().to_string(), "100.50");
        assert_eq!(outcome.kept_total().to_string(), "-50.00");
    }

    struct ExcludeEverything;

    impl Classifier for ExcludeEverything {
        fn classify(&self, memo: &Memo) -> Verdict {
            match memo {
                Memo::Text(_) => Verdict::Exclude,
                Memo::Missing => Verdict::Keep,
            }
        }
    }

    #[test]
    fn test_custom_classifier() {
        let input = statement(&[
            record("1", "-1.00", Some("PIX")),
            record("2", "-2.00", None),
        ]);

        let outcome = StatementFilter::new(ExcludeEverything).filter(input.as_bytes());

        assert_eq!(outcome.excluded_memos(), vec!["PIX"]);
        assert_eq!(outcome.kept_memos(), vec![NO_MEMO]);
        assert_eq!(outcome.filtered, statement(&[record("2", "-2.00", None)]).into_bytes());
    }

    #[test]
    fn test_from_config() {
        let config = FilterConfig {
            exclusion_patterns: vec!["tarifa".to_string()],
            display_collapse: vec![],
        };
        let input = statement(&[
            record("1", "-9.90", Some("TARIFA PACOTE SERVICOS")),
            record("2", "100.00", Some("RESGATE INVEST FACIL 123")),
        ]);

        let outcome = StatementFilter::from_config(&config).filter(input.as_bytes());

        assert_eq!(outcome.excluded_memos(), vec!["TARIFA PACOTE SERVICOS"]);
        assert_eq!(outcome.kept_memos(), vec!["RESGATE INVEST FACIL 123"]);
    }
}
