// 扁平XML报文编解码
// v2协议报文为单层<xml>结构, 值以CDATA或纯文本承载

use super::error::{Result, WxPayError};
use super::types::Params;

/// 参数表编码为XML报文, 空值参数不进入报文 (与签名串的取值范围一致)
pub fn to_xml(params: &Params) -> String {
    let mut out = String::with_capacity(64 + params.len() * 48);
    out.push_str("<xml>");
    for (key, value) in params {
        if value.is_empty() {
            continue;
        }
        out.push('<');
        out.push_str(key);
        out.push_str("><![CDATA[");
        out.push_str(value);
        out.push_str("]]></");
        out.push_str(key);
        out.push('>');
    }
    out.push_str("</xml>");
    out
}

/// XML报文解析为参数表
pub fn from_xml(text: &str) -> Result<Params> {
    let mut trimmed = text.trim();
    // 跳过可能出现的XML声明
    if trimmed.starts_with("<?") {
        let end = trimmed
            .find("?>")
            .ok_or_else(|| WxPayError::Parse("unterminated xml declaration".to_string()))?;
        trimmed = trimmed[end + 2..].trim_start();
    }

    let body = trimmed
        .strip_prefix("<xml>")
        .and_then(|rest| rest.strip_suffix("</xml>"))
        .ok_or_else(|| WxPayError::Parse("missing <xml> envelope".to_string()))?;

    let mut params = Params::new();
    let mut rest = body;
    loop {
        let open = match rest.find('<') {
            Some(pos) => pos,
            None => break,
        };
        if !rest[..open].trim().is_empty() {
            return Err(WxPayError::Parse("unexpected text between elements".to_string()));
        }
        rest = &rest[open + 1..];

        let close = rest
            .find('>')
            .ok_or_else(|| WxPayError::Parse("unterminated tag".to_string()))?;
        let name = &rest[..close];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(WxPayError::Parse(format!("bad element name: {:?}", name)));
        }
        rest = &rest[close + 1..];

        let end_tag = format!("</{}>", name);
        let end = rest
            .find(&end_tag)
            .ok_or_else(|| WxPayError::Parse(format!("unclosed element: {}", name)))?;
        let raw = &rest[..end];
        rest = &rest[end + end_tag.len()..];

        params.insert(name.to_string(), unwrap_cdata(raw).to_string());
    }
    Ok(params)
}

/// 剥除CDATA封装, 非CDATA值按裸文本处理
fn unwrap_cdata(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_xml() {
        let mut params = Params::new();
        params.insert("mch_id".to_string(), "10000100".to_string());
        params.insert("appid".to_string(), "wx8888".to_string());
        assert_eq!(
            to_xml(&params),
            "<xml><appid><![CDATA[wx8888]]></appid><mch_id><![CDATA[10000100]]></mch_id></xml>"
        );
    }

    #[test]
    fn test_to_xml_skips_empty_values() {
        use super::super::{sign, SignType};

        let mut params = Params::new();
        params.insert("appid".to_string(), "wx8888".to_string());
        params.insert("notify_url".to_string(), String::new());

        let body = to_xml(&params);
        assert!(!body.contains("<notify_url>"));

        // 空值同样不参与签名, 报文与签名串取值范围一致
        let key = "192006250b4c09247ec02edce69f6a2d";
        let mut without = Params::new();
        without.insert("appid".to_string(), "wx8888".to_string());
        assert_eq!(
            sign::sign(&params, key, SignType::Md5),
            sign::sign(&without, key, SignType::Md5)
        );
    }

    #[test]
    fn test_from_xml_mixed_values() {
        let text = "\n<xml>\n  <return_code><![CDATA[SUCCESS]]></return_code>\n  <total_fee>201</total_fee>\n  <return_msg><![CDATA[OK]]></return_msg>\n</xml>\n";
        let params = from_xml(text).unwrap();
        assert_eq!(params.get("return_code").unwrap(), "SUCCESS");
        assert_eq!(params.get("total_fee").unwrap(), "201");
        assert_eq!(params.get("return_msg").unwrap(), "OK");
    }

    #[test]
    fn test_roundtrip() {
        let mut params = Params::new();
        params.insert("body".to_string(), "测试商品 <&>".to_string());
        params.insert("out_trade_no".to_string(), "NO.10086".to_string());
        let parsed = from_xml(&to_xml(&params)).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_from_xml_with_declaration() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><xml><a>1</a></xml>";
        let params = from_xml(text).unwrap();
        assert_eq!(params.get("a").unwrap(), "1");
    }

    #[test]
    fn test_from_xml_rejects_bad_payloads() {
        assert!(from_xml("not xml at all").is_err());
        assert!(from_xml("<xml><a>1</xml>").is_err());
        assert!(from_xml("<xml><a b=\"c\">1</a></xml>").is_err());
    }
}
