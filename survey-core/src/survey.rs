use crate::model::WeatherRecord;
use crate::provider::WeatherProvider;

/// Fetch current weather for every candidate city, strictly one request
/// at a time, in candidate order.
///
/// A failed fetch leaves that row unpopulated and the loop moves on to
/// the next city; the cause is logged but never inspected. No retries.
pub async fn run_survey(provider: &dyn WeatherProvider, cities: &[String]) -> Vec<WeatherRecord> {
    println!("Beginning Data Retrieval");
    println!("-----------------------------");

    let mut records = Vec::with_capacity(cities.len());

    for (index, city) in cities.iter().enumerate() {
        println!("Processing Record {index} | {city}");

        match provider.current_by_city(city).await {
            Ok(obs) => records.push(WeatherRecord::fetched(city.clone(), obs)),
            Err(_) => {
                println!("Can't find data for city: {city} ... skipping.");
                records.push(WeatherRecord::unfetched(city.clone()));
            }
        }
    }

    records
}

/// Keep only usable records, preserving candidate order.
pub fn assemble_dataset(records: Vec<WeatherRecord>) -> Vec<WeatherRecord> {
    records.into_iter().filter(WeatherRecord::is_usable).collect()
}

/// Advisory check on unique city count. A shortfall is a warning only;
/// the run continues either way.
pub fn report_city_count(count: usize, min: usize) {
    println!("{count}");
    if count >= min {
        println!("We have >= {min} unique (non-repeat) cities");
    } else {
        println!("WARNING! We have less than {min} unique (non-repeat) cities");
    }
}

/// Advisory check on the filtered dataset size, same policy.
pub fn report_dataset_count(count: usize, min: usize) {
    if count >= min {
        println!("After filtering, we still have sufficient numbers of data (>={min})");
    } else {
        println!("WARNING! After filtering, we have less than {min} rows of data");
    }
}
