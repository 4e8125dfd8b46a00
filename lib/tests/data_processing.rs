#[cfg(test)]
mod test {
    use certificate_dispatch_processor::recipient_processor::RecipientProcessor;
    use certificate_dispatch_processor::validation;
    use std::collections::HashMap;

    fn row(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries.iter().map(|(column, value)| (column.to_string(), value.to_string())).collect()
    }

    #[test]
    fn should_ingest_rows_with_synonym_and_mixed_case_columns() {
        let rows = vec![row(&[
            ("Nome ", "Ana"),
            ("CPF", "111"),
            ("Fone", "11987654321"),
            ("E-mail", "ana@example.com"),
            ("Certificado", "sim"),
        ])];

        let raw_recipients = RecipientProcessor::ingest(&rows).unwrap();

        assert_eq!(1, raw_recipients.len());
        assert_eq!("Ana", raw_recipients[0].nome);
        assert_eq!("11987654321", raw_recipients[0].telefone);
        assert_eq!("ana@example.com", raw_recipients[0].email);
        assert_eq!("sim", raw_recipients[0].certificado);
    }

    #[test]
    fn should_reject_upload_with_missing_columns() {
        let rows = vec![row(&[("nome", "Ana"), ("email", "ana@example.com")])];

        let error = RecipientProcessor::ingest(&rows).expect_err("Upload should have been rejected");

        assert_eq!(400, error.status_code);
        assert_eq!("missing_required_columns", error.cause);
        let message = error.message.unwrap_or_default();
        assert!(message.contains("cpf"));
        assert!(message.contains("telefone"));
        assert!(message.contains("certificado"));
    }

    #[test]
    fn should_reject_empty_upload() {
        let error = RecipientProcessor::ingest(&[]).expect_err("Empty upload should have been rejected");

        assert_eq!("empty_upload", error.cause);
    }

    #[test]
    fn should_only_certify_rows_marked_sim() {
        let rows = vec![
            row(&[("nome", "Ana"), ("cpf", "111"), ("telefone", "11987654321"), ("email", "a@b.com"), ("certificado", "sim")]),
            row(&[("nome", "Bruno"), ("cpf", "222"), ("telefone", "11987654322"), ("email", "c@d.com"), ("certificado", "não")]),
            row(&[("nome", "Carla"), ("cpf", "333"), ("telefone", "11987654323"), ("email", "bad-email"), ("certificado", "SIM")]),
        ];

        let raw_recipients = RecipientProcessor::ingest(&rows).unwrap();
        let recipients = RecipientProcessor::process(&raw_recipients);

        assert_eq!(2, recipients.len());
        assert_eq!("ANA", recipients[0].name);
        assert!(recipients[0].is_eligible);
        assert_eq!("CARLA", recipients[1].name);
        assert!(!recipients[1].is_eligible);
        assert_eq!(Some("Formato de email inválido".to_string()), recipients[1].email_error);
    }

    #[test]
    fn should_format_recipient_fields() {
        let rows = vec![row(&[
            ("nome", "joão copy da silva "),
            ("cpf", "111"),
            ("telefone", "11 98765-4321"),
            ("email", " Ana@Example.COM "),
            ("certificado", " Sim "),
        ])];

        let raw_recipients = RecipientProcessor::ingest(&rows).unwrap();
        let recipients = RecipientProcessor::process(&raw_recipients);

        assert_eq!(1, recipients.len());
        assert_eq!("JOÃO DA SILVA", recipients[0].name);
        assert_eq!("000.000.001-11", recipients[0].tax_id);
        assert_eq!("+5511987654321", recipients[0].phone);
        assert_eq!("ana@example.com", recipients[0].email);
        assert!(recipients[0].is_eligible);
        assert_eq!(None, recipients[0].email_error);
    }

    #[test]
    fn should_validate_email_variants() {
        let empty = validation::validate_email("   ");
        assert!(!empty.is_valid);
        assert_eq!(Some("Email vazio".to_string()), empty.error);

        let malformed = validation::validate_email("bad-email");
        assert!(!malformed.is_valid);
        assert_eq!(Some("Formato de email inválido".to_string()), malformed.error);

        let spaced = validation::validate_email("ana maria@example.com");
        assert!(!spaced.is_valid);

        let valid = validation::validate_email(" ana@example.com ");
        assert!(valid.is_valid);
        assert_eq!(None, valid.error);
    }

    #[test]
    fn should_keep_country_code_when_already_present() {
        assert_eq!("+5511987654321", validation::format_phone("5511987654321"));
        assert_eq!("+5511987654321", validation::format_phone("(11) 98765-4321"));
        assert_eq!("+141198765432101", validation::format_phone("141198765432101"));
    }

    #[test]
    fn should_pad_short_tax_ids() {
        assert_eq!("000.000.001-11", validation::format_tax_id("111"));
        assert_eq!("123.456.789-09", validation::format_tax_id("123.456.789-09"));
    }

    #[test]
    fn should_recompute_eligibility_on_edit() {
        let rows = vec![row(&[("nome", "Ana"), ("cpf", "111"), ("telefone", "11987654321"), ("email", "bad-email"), ("certificado", "sim")])];

        let recipients = RecipientProcessor::process(&RecipientProcessor::ingest(&rows).unwrap());
        assert!(!recipients[0].is_eligible);

        let mut edited = recipients[0].clone();
        edited.email = "ana@example.com".to_string();
        let revalidated = RecipientProcessor::revalidate(&edited);

        assert!(revalidated.is_eligible);
        assert_eq!(None, revalidated.email_error);
        assert_eq!(recipients[0].id, revalidated.id);
    }
}
