//! 天气类别与天气报告

use serde::{Deserialize, Serialize};

// =========================================================
// WeatherCategory
// =========================================================

/// 页面可展示的天气类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    Clear,
    Rain,
    Snow,
    Clouds,
    Haze,
    Smoke,
    Mist,
    Drizzle,
    /// 非 2xx 响应时的固定类别
    NotFound,
}

impl WeatherCategory {
    /// 可由天气条件映射得到的八个类别
    pub const KNOWN: [WeatherCategory; 8] = [
        WeatherCategory::Clear,
        WeatherCategory::Rain,
        WeatherCategory::Snow,
        WeatherCategory::Clouds,
        WeatherCategory::Haze,
        WeatherCategory::Smoke,
        WeatherCategory::Mist,
        WeatherCategory::Drizzle,
    ];

    /// 精确匹配主天气条件，无法识别时返回 None
    pub fn from_condition(main: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|c| c.label() == main)
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "Clear",
            WeatherCategory::Rain => "Rain",
            WeatherCategory::Snow => "Snow",
            WeatherCategory::Clouds => "Clouds",
            WeatherCategory::Haze => "Haze",
            WeatherCategory::Smoke => "Smoke",
            WeatherCategory::Mist => "Mist",
            WeatherCategory::Drizzle => "Drizzle",
            WeatherCategory::NotFound => "Not Found",
        }
    }

    pub fn icon_url(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "https://cdn-icons-png.flaticon.com/512/6974/6974833.png",
            WeatherCategory::Rain => "https://cdn-icons-png.flaticon.com/512/3351/3351979.png",
            WeatherCategory::Snow => "https://cdn-icons-png.flaticon.com/512/642/642102.png",
            WeatherCategory::Clouds => "https://cdn-icons-png.flaticon.com/512/414/414825.png",
            WeatherCategory::Haze => "https://cdn-icons-png.flaticon.com/512/1197/1197102.png",
            WeatherCategory::Smoke => "https://cdn-icons-png.flaticon.com/512/4380/4380458.png",
            WeatherCategory::Mist => "https://cdn-icons-png.flaticon.com/512/4005/4005901.png",
            WeatherCategory::Drizzle => "https://cdn-icons-png.flaticon.com/512/3076/3076129.png",
            WeatherCategory::NotFound => "https://cdn-icons-png.flaticon.com/512/4275/4275497.png",
        }
    }
}

// =========================================================
// WeatherReport - 天气接口 2xx 响应体
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub name: String,
    #[serde(default)]
    pub sys: CountryInfo,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: Readings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
}

impl WeatherReport {
    pub fn primary_condition(&self) -> Option<&str> {
        self.weather.first().map(|c| c.main.as_str())
    }

    /// `"{name},{country}"`
    pub fn location_label(&self) -> String {
        format!("{},{}", self.name, self.sys.country)
    }

    pub fn category(&self) -> Option<WeatherCategory> {
        self.primary_condition()
            .and_then(WeatherCategory::from_condition)
    }
}

// =========================================================
// WeatherDisplay - 面板展示状态
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherDisplay {
    /// 成功且天气条件可识别
    Report {
        report: WeatherReport,
        category: WeatherCategory,
    },
    /// 成功但天气条件无法识别：不显示面板
    Hidden,
    /// 非 2xx 响应
    NotFound,
}

impl WeatherDisplay {
    pub fn from_report(report: WeatherReport) -> Self {
        match report.category() {
            Some(category) => WeatherDisplay::Report { report, category },
            None => WeatherDisplay::Hidden,
        }
    }

    /// 当前应展示的类别
    pub fn category(&self) -> Option<WeatherCategory> {
        match self {
            WeatherDisplay::Report { category, .. } => Some(*category),
            WeatherDisplay::Hidden => None,
            WeatherDisplay::NotFound => Some(WeatherCategory::NotFound),
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherDisplay::Report { report, .. } => Some(report),
            _ => None,
        }
    }
}
