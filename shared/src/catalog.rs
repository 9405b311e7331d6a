//! Read-only reference catalogs supplied by external collaborators:
//! pre-approved travel applications, the project list, and the city list
//! with its hardship designations. Nothing in here is ever mutated by the
//! form; the reducer copies template data out of it on application
//! selection.

use crate::models::{Application, City, Expense, ExpenseSource, PolicyStatus, Project, Trip};

fn template_trip(
    id: &str,
    from: &str,
    to: &str,
    start_date: &str,
    start_time: &str,
    end_date: &str,
    end_time: &str,
    days: u32,
    is_hardship: bool,
) -> Trip {
    Trip {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        start_date: start_date.to_string(),
        start_time: start_time.to_string(),
        end_date: end_date.to_string(),
        end_time: end_time.to_string(),
        days,
        is_hardship,
        // Owner and party are not part of the application template; the
        // reducer fills them from the roster on merge.
        main_traveler_id: String::new(),
        fellow_traveler_ids: Vec::new(),
        specific_hardship_area: String::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn corp_expense(
    id: &str,
    category: &str,
    kind: &str,
    date: &str,
    invoice_amount: f64,
    tax_rate: u8,
    tax_amount: f64,
    description: &str,
    policy_status: PolicyStatus,
    policy_message: Option<&str>,
) -> Expense {
    Expense {
        id: id.to_string(),
        source: ExpenseSource::Corp,
        category: category.to_string(),
        kind: kind.to_string(),
        date: date.to_string(),
        invoice_amount,
        reimbursable_amount: invoice_amount,
        tax_rate,
        tax_amount,
        payee_id: "U1".to_string(),
        description: description.to_string(),
        policy_status,
        policy_message: policy_message.map(str::to_string),
        receipt: true,
    }
}

/// All pre-approved travel applications.
pub fn applications() -> Vec<Application> {
    vec![
        Application {
            id: "TRIP-2024-BJ001".to_string(),
            title: "1月北京上海技术交流 (已批准)".to_string(),
            date: "2024-01-04".to_string(),
            trips: vec![
                template_trip(
                    "trip::101", "上海", "成都", "2024-01-05", "09:00", "2024-01-06", "12:00", 1,
                    false,
                ),
                template_trip(
                    "trip::102", "成都", "喀什", "2024-01-06", "14:00", "2024-01-09", "18:00", 3,
                    true,
                ),
            ],
            corp_expenses: vec![
                corp_expense(
                    "expense::201",
                    "交通",
                    "机票",
                    "2024-01-05",
                    2500.00,
                    9,
                    206.42,
                    "上海-成都 (商旅预订)",
                    PolicyStatus::Ok,
                    None,
                ),
                corp_expense(
                    "expense::202",
                    "交通",
                    "机票",
                    "2024-01-06",
                    3600.00,
                    9,
                    297.25,
                    "成都-喀什 (旺季票价)",
                    PolicyStatus::Warn,
                    Some("需补充说明"),
                ),
            ],
        },
        Application {
            id: "TRIP-2024-SZ002".to_string(),
            title: "2月深圳研发峰会 (常规城市)".to_string(),
            date: "2024-02-10".to_string(),
            trips: vec![template_trip(
                "trip::103", "北京", "深圳", "2024-02-10", "10:00", "2024-02-12", "18:00", 2, false,
            )],
            corp_expenses: vec![corp_expense(
                "expense::203",
                "住宿",
                "酒店",
                "2024-02-10",
                1200.00,
                6,
                67.92,
                "深圳湾万丽酒店",
                PolicyStatus::Ok,
                None,
            )],
        },
        Application {
            id: "TRIP-2024-XJ003".to_string(),
            title: "3月新疆边疆调研 (含艰苦补贴测试)".to_string(),
            date: "2024-03-10".to_string(),
            trips: vec![
                template_trip(
                    "trip::105", "北京", "乌鲁木齐", "2024-03-10", "08:00", "2024-03-10", "13:00",
                    1, false,
                ),
                template_trip(
                    "trip::106", "乌鲁木齐", "和田", "2024-03-10", "15:00", "2024-03-15", "18:00",
                    5, true,
                ),
            ],
            corp_expenses: vec![
                corp_expense(
                    "expense::205",
                    "交通",
                    "机票",
                    "2024-03-10",
                    3200.00,
                    9,
                    264.22,
                    "北京-乌鲁木齐 (公务舱)",
                    PolicyStatus::Ok,
                    None,
                ),
                corp_expense(
                    "expense::206",
                    "住宿",
                    "酒店",
                    "2024-03-10",
                    2500.00,
                    6,
                    141.51,
                    "和田迎宾馆 (5晚)",
                    PolicyStatus::Ok,
                    None,
                ),
                corp_expense(
                    "expense::207",
                    "交通",
                    "火车",
                    "2024-03-15",
                    450.00,
                    9,
                    37.16,
                    "和田-喀什 (软卧)",
                    PolicyStatus::Ok,
                    None,
                ),
            ],
        },
    ]
}

/// Look up an application by id.
pub fn find_application(id: &str) -> Option<Application> {
    applications().into_iter().find(|app| app.id == id)
}

/// All projects available to the project lookup.
pub fn projects() -> Vec<Project> {
    let records = [
        ("RD-2024-AI-001", "人工智能大模型预研"),
        ("RD-2024-CLOUD-002", "云原生架构升级"),
        ("MKT-2024-Q1-003", "Q1市场推广专项"),
        ("OP-2024-INT-004", "内部运营效率优化"),
        ("RD-2025-NEXT-005", "下一代产品规划"),
    ];
    records
        .into_iter()
        .map(|(code, name)| Project {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Projects matching a free-text query against code (case-insensitive)
/// or name. An empty query matches everything.
pub fn search_projects(query: &str) -> Vec<Project> {
    let needle = query.to_lowercase();
    projects()
        .into_iter()
        .filter(|p| p.code.to_lowercase().contains(&needle) || p.name.contains(query))
        .collect()
}

/// The full city catalog.
pub fn cities() -> Vec<City> {
    let records = [
        ("北京", "beijing", false, "一线"),
        ("上海", "shanghai", false, "一线"),
        ("广州", "guangzhou", false, "一线"),
        ("深圳", "shenzhen", false, "一线"),
        ("杭州", "hangzhou", false, "新一线"),
        ("成都", "chengdu", false, "新一线"),
        ("武汉", "wuhan", false, "新一线"),
        ("西安", "xian", false, "新一线"),
        ("南京", "nanjing", false, "新一线"),
        ("喀什", "kashi", true, "艰苦"),
        ("拉萨", "lasa", true, "艰苦"),
        ("和田", "hetian", true, "艰苦"),
        ("阿里", "ali", true, "艰苦"),
        ("玉树", "yushu", true, "艰苦"),
        ("那曲", "naqu", true, "艰苦"),
        ("哈尔滨", "haerbin", false, "省会"),
        ("沈阳", "shenyang", false, "省会"),
        ("济南", "jinan", false, "省会"),
        ("乌鲁木齐", "wulumuqi", false, "省会"),
    ];
    records
        .into_iter()
        .map(|(name, pinyin, hardship, tier)| City {
            name: name.to_string(),
            pinyin: pinyin.to_string(),
            hardship,
            tier: tier.to_string(),
        })
        .collect()
}

/// Curated hot-city subset shown before the user types anything.
pub fn hot_cities() -> Vec<City> {
    const HOT: [&str; 6] = ["北京", "上海", "广州", "深圳", "成都", "杭州"];
    let all = cities();
    HOT.iter()
        .filter_map(|name| all.iter().find(|c| c.name == *name).cloned())
        .collect()
}

/// Look up a city by exact name.
pub fn find_city(name: &str) -> Option<City> {
    cities().into_iter().find(|c| c.name == name)
}

/// Cities matching a free-text query against the name or pinyin key.
/// An empty query matches everything.
pub fn search_cities(query: &str) -> Vec<City> {
    let needle = query.to_lowercase();
    cities()
        .into_iter()
        .filter(|c| c.name.contains(query) || c.pinyin.contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_application() {
        let app = find_application("TRIP-2024-BJ001").unwrap();
        assert_eq!(app.trips.len(), 2);
        assert_eq!(app.corp_expenses.len(), 2);
        assert!(app.trips[1].is_hardship);

        assert!(find_application("TRIP-9999-XX000").is_none());
    }

    #[test]
    fn test_template_trips_have_no_party_assignment() {
        for app in applications() {
            for trip in &app.trips {
                assert!(trip.main_traveler_id.is_empty());
                assert!(trip.fellow_traveler_ids.is_empty());
            }
        }
    }

    #[test]
    fn test_search_cities_by_pinyin() {
        let matches = search_cities("kashi");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "喀什");
        assert!(matches[0].hardship);
    }

    #[test]
    fn test_search_cities_by_name_fragment() {
        let matches = search_cities("乌鲁");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "乌鲁木齐");
        assert!(!matches[0].hardship);
    }

    #[test]
    fn test_find_city_exact_name() {
        assert!(find_city("拉萨").unwrap().hardship);
        assert!(find_city("拉").is_none());
    }

    #[test]
    fn test_search_cities_empty_query_returns_all() {
        assert_eq!(search_cities("").len(), cities().len());
    }

    #[test]
    fn test_hot_cities_subset() {
        let hot = hot_cities();
        assert_eq!(hot.len(), 6);
        assert!(hot.iter().all(|c| !c.hardship));
    }

    #[test]
    fn test_search_projects_by_code_case_insensitive() {
        let matches = search_projects("rd-2024");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_search_projects_by_name() {
        let matches = search_projects("市场推广");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].code, "MKT-2024-Q1-003");
    }
}
