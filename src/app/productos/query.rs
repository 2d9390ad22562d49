//! 商品列表查询
//!
//! 查询字符串先在边界处一次性转换为强类型的 [`ProductQuery`]，再依次经过
//! 文本过滤、字段过滤、排序、分页四个阶段。任何输入都不会导致错误，
//! 无效值一律回退到默认值。

use std::cmp::Ordering;

use super::model::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// 原始查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub q: Option<String>,
    pub categoria: Option<String>,
    pub provincia: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    /// 由查询字符串的键值对构造，重复的键取第一次出现的值，未知键忽略
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "categoria" => &mut params.categoria,
                "provincia" => &mut params.provincia,
                "_page" => &mut params.page,
                "_limit" => &mut params.limit,
                "_sort" => &mut params.sort,
                "_order" => &mut params.order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// 可排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Titulo,
    Descripcion,
    Categoria,
    Provincia,
    FechaPublicacion,
    OwnerId,
    CreatedAt,
    /// 未知字段：所有记录视为相等，保持过滤后的顺序
    Unrecognized,
}

impl SortField {
    pub fn parse(name: &str) -> Self {
        match name {
            "id" => SortField::Id,
            "titulo" => SortField::Titulo,
            "descripcion" => SortField::Descripcion,
            "categoria" => SortField::Categoria,
            "provincia" => SortField::Provincia,
            "fechaPublicacion" => SortField::FechaPublicacion,
            "ownerId" => SortField::OwnerId,
            "createdAt" => SortField::CreatedAt,
            _ => SortField::Unrecognized,
        }
    }

    /// 升序比较器
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Titulo => a.titulo.cmp(&b.titulo),
            SortField::Descripcion => a.descripcion.cmp(&b.descripcion),
            SortField::Categoria => a.categoria.cmp(&b.categoria),
            SortField::Provincia => a.provincia.cmp(&b.provincia),
            SortField::FechaPublicacion => a.fecha_publicacion.cmp(&b.fecha_publicacion),
            SortField::OwnerId => a.owner_id.cmp(&b.owner_id),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Unrecognized => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// 只有 `desc`（不区分大小写）表示降序，其余取值一律升序
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// 强类型查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub text: String,
    pub categoria: String,
    pub provincia: String,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            categoria: String::new(),
            provincia: String::new(),
            sort: SortField::FechaPublicacion,
            order: SortOrder::Desc,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        let defaults = ProductQuery::default();
        Self {
            text: params.q.unwrap_or_default(),
            categoria: params.categoria.unwrap_or_default(),
            provincia: params.provincia.unwrap_or_default(),
            sort: params
                .sort
                .as_deref()
                .map(SortField::parse)
                .unwrap_or(defaults.sort),
            order: params
                .order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or(defaults.order),
            page: coerce_positive(params.page.as_deref(), DEFAULT_PAGE),
            limit: coerce_positive(params.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

/// 查询结果：当前页以及过滤后（分页前）的总数
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Product>,
    pub total: usize,
}

/// 解析前导整数：允许前导空白与正负号，忽略数字之后的内容
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// 无法解析或为 0 时使用默认值，最终结果至少为 1
fn coerce_positive(raw: Option<&str>, default: usize) -> usize {
    let value = raw
        .and_then(parse_leading_int)
        .filter(|&n| n != 0)
        .unwrap_or(default as i64);

    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

/// 文本过滤：titulo + " " + descripcion 包含关键字（不区分大小写）
pub fn matches_text(product: &Product, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    format!("{} {}", product.titulo, product.descripcion)
        .to_lowercase()
        .contains(needle_lower)
}

/// 字段过滤：参数为空时不过滤，否则不区分大小写地精确匹配
pub fn matches_field(value: &str, wanted_lower: &str) -> bool {
    wanted_lower.is_empty() || value.to_lowercase() == wanted_lower
}

impl ProductQuery {
    /// 依次执行过滤、排序、分页
    pub fn apply<'a, I>(&self, products: I) -> Page
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let text = self.text.to_lowercase();
        let categoria = self.categoria.to_lowercase();
        let provincia = self.provincia.to_lowercase();

        let mut filtered: Vec<&Product> = products
            .into_iter()
            .filter(|p| matches_text(p, &text))
            .filter(|p| matches_field(&p.categoria, &categoria))
            .filter(|p| matches_field(&p.provincia, &provincia))
            .collect();

        let total = filtered.len();

        // 降序时翻转比较器的符号，而不是翻转排序结果，相等元素保持原有相对顺序
        filtered.sort_by(|a, b| {
            let ordering = self.sort.compare(a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        let items = filtered
            .into_iter()
            .skip(start)
            .take(self.limit)
            .cloned()
            .collect();

        Page { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, titulo: &str, categoria: &str, fecha: &str) -> Product {
        Product {
            id,
            titulo: titulo.to_string(),
            descripcion: format!("descripcion de {}", titulo),
            categoria: categoria.to_string(),
            provincia: String::new(),
            fecha_publicacion: fecha.to_string(),
            owner_id: 1,
            created_at: fecha.to_string(),
        }
    }

    fn dozen() -> Vec<Product> {
        (1..=12)
            .map(|i| {
                product(
                    i,
                    &format!("item {}", i),
                    "hogar",
                    &format!("2024-01-{:02}T00:00:00.000Z", i),
                )
            })
            .collect()
    }

    fn params(pairs: &[(&str, &str)]) -> ProductQuery {
        ListParams::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .into()
    }

    #[test]
    fn defaults_when_params_missing() {
        let query: ProductQuery = ListParams::default().into();
        assert_eq!(query, ProductQuery::default());
        assert_eq!(query.sort, SortField::FechaPublicacion);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!((query.page, query.limit), (1, 10));
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let params = ListParams::from_pairs(vec![
            ("q".to_string(), "a".to_string()),
            ("q".to_string(), "b".to_string()),
            ("precio".to_string(), "10".to_string()),
            ("_page".to_string(), "2".to_string()),
        ]);
        assert_eq!(params.q.as_deref(), Some("a"));
        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.limit, None);
    }

    #[test]
    fn zero_page_built_directly_does_not_underflow() {
        let data = dozen();
        let query = ProductQuery {
            page: 0,
            limit: 5,
            ..ProductQuery::default()
        };
        let page = query.apply(&data);
        assert_eq!(page.total, 12);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(params(&[("_page", "abc")]).page, 1);
        assert_eq!(params(&[("_page", "0")]).page, 1);
        assert_eq!(params(&[("_page", "-3")]).page, 1);
        assert_eq!(params(&[("_page", "3abc")]).page, 3);
        assert_eq!(params(&[("_page", "2.7")]).page, 2);
        assert_eq!(params(&[("_page", " 4")]).page, 4);
        assert_eq!(params(&[("_limit", "0")]).limit, DEFAULT_LIMIT);
        assert_eq!(params(&[("_limit", "-4")]).limit, 1);
        assert_eq!(params(&[("_limit", "")]).limit, DEFAULT_LIMIT);
        assert_eq!(params(&[("_limit", "25")]).limit, 25);
    }

    #[test]
    fn order_parsing() {
        assert_eq!(params(&[("_order", "DESC")]).order, SortOrder::Desc);
        assert_eq!(params(&[("_order", "asc")]).order, SortOrder::Asc);
        assert_eq!(params(&[("_order", "sideways")]).order, SortOrder::Asc);
    }

    #[test]
    fn pagination_slices_filtered_results() {
        let data = dozen();
        let asc = [("_sort", "id"), ("_order", "asc"), ("_limit", "5")];

        let page2 = params(&[asc[0], asc[1], asc[2], ("_page", "2")]).apply(&data);
        assert_eq!(page2.total, 12);
        let ids: Vec<i64> = page2.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);

        let page3 = params(&[asc[0], asc[1], asc[2], ("_page", "3")]).apply(&data);
        assert_eq!(page3.items.len(), 2);

        let page4 = params(&[asc[0], asc[1], asc[2], ("_page", "4")]).apply(&data);
        assert!(page4.items.is_empty());
        assert_eq!(page4.total, 12);
    }

    #[test]
    fn huge_page_yields_empty_page() {
        let data = dozen();
        let page = params(&[("_page", "99999999999999999999999")]).apply(&data);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 12);
    }

    #[test]
    fn default_sort_is_newest_first() {
        let data = dozen();
        let page = ProductQuery::default().apply(&data);
        assert_eq!(page.items[0].id, 12);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn text_filter_is_case_insensitive_over_title_and_description() {
        let mut data = dozen();
        data[0].titulo = "Guitarra Electrica".to_string();
        data[1].descripcion = "incluye GUITARRA de regalo".to_string();

        let page = params(&[("q", "guitarra")]).apply(&data);
        assert_eq!(page.total, 2);

        // 标题与描述之间以空格拼接
        let joined = params(&[("q", "electrica descripcion")]).apply(&data);
        assert_eq!(joined.total, 1);
    }

    #[test]
    fn field_filters_are_exact_and_case_insensitive() {
        let mut data = dozen();
        data[3].categoria = "tecnologia".to_string();
        data[4].categoria = "tecnologia y mas".to_string();
        data[3].provincia = "Mendoza".to_string();

        let page = params(&[("categoria", "TECNOLOGIA")]).apply(&data);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, 4);

        let both = params(&[("categoria", "tecnologia"), ("provincia", "salta")]).apply(&data);
        assert_eq!(both.total, 0);
    }

    #[test]
    fn desc_keeps_ties_in_original_order() {
        let data = vec![
            product(1, "a", "x", "2024-01-01"),
            product(2, "b", "x", "2024-01-01"),
            product(3, "c", "x", "2024-02-01"),
        ];

        let desc = params(&[("_sort", "categoria")]).apply(&data);
        let ids: Vec<i64> = desc.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let by_date = ProductQuery::default().apply(&data);
        let ids: Vec<i64> = by_date.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn unknown_sort_field_keeps_order() {
        let data = dozen();
        let page = params(&[("_sort", "precio"), ("_limit", "12")]).apply(&data);
        let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }
}
