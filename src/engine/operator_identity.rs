// ==========================================
// manobrista 产能报表 - manobrista 身份解析
// ==========================================
// 格式: "<ID> - <NOME>"
// 规则: ID 取第一个 '-' 之前；姓名取最后一个 '-' 之后（均 trim）
//       无 '-' 时 ID 为空，姓名为整串
// ==========================================

/// 解析后的 manobrista 身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorIdentity {
    pub matricula: String,
    pub nome: String,
}

impl OperatorIdentity {
    pub fn parse(operator: &str) -> Self {
        match (operator.split_once('-'), operator.rsplit_once('-')) {
            (Some((head, _)), Some((_, tail))) => Self {
                matricula: head.trim().to_string(),
                nome: tail.trim().to_string(),
            },
            _ => Self {
                matricula: String::new(),
                nome: operator.trim().to_string(),
            },
        }
    }

    pub fn into_pair(self) -> (String, String) {
        (self.matricula, self.nome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> (String, String) {
        OperatorIdentity::parse(s).into_pair()
    }

    #[test]
    fn test_id_and_name() {
        assert_eq!(
            parse("12345 - JOSE DA SILVA"),
            ("12345".to_string(), "JOSE DA SILVA".to_string())
        );
    }

    #[test]
    fn test_name_only() {
        assert_eq!(
            parse("JOSE DA SILVA"),
            (String::new(), "JOSE DA SILVA".to_string())
        );
        assert_eq!(parse("  ANA  "), (String::new(), "ANA".to_string()));
    }

    #[test]
    fn test_first_split_id_last_split_name() {
        assert_eq!(parse("A-B-C"), ("A".to_string(), "C".to_string()));
        assert_eq!(
            parse("777 - MARIA-CLARA SOUZA"),
            ("777".to_string(), "CLARA SOUZA".to_string())
        );
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(parse("999 -"), ("999".to_string(), String::new()));
    }
}
